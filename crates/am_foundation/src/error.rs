// crates/am_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `AmError` 枚举和 `AmResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，物理相关错误在 am_physics 中扩展
//! 2. **阶段可追溯**: 数值故障必须携带失败阶段的名称
//! 3. **不可恢复**: 单个时间步内的任何失败都视为该次推进的致命错误，
//!    不做静默修复或钳位
//!
//! # 示例
//!
//! ```
//! use am_foundation::error::{AmError, AmResult};
//!
//! fn check_density(d: f64) -> AmResult<()> {
//!     if d <= 0.0 {
//!         return Err(AmError::numerical("corrector-commit", "负密度"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type AmResult<T> = Result<T, AmError>;

/// AstroMHD 错误类型
///
/// 核心错误类型，用于整个项目。
#[derive(Error, Debug)]
pub enum AmError {
    /// 工作区或网格缓冲区分配失败
    ///
    /// 发生在初始化阶段。出现此错误后整个运行必须中止。
    #[error("内存分配失败: {what} 需要 {bytes} 字节")]
    Allocation {
        /// 分配对象的描述
        what: &'static str,
        /// 请求的字节数
        bytes: usize,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 描述性错误信息
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数值故障
    ///
    /// 负密度、非物理压强等。携带失败阶段名称以便定位。
    /// 本错误对当前时间步不可恢复，半步状态不得提交到持久状态。
    #[error("数值故障 [{stage}]: {message}")]
    Numerical {
        /// 失败阶段名称
        stage: String,
        /// 描述性错误信息
        message: String,
    },
}

impl AmError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建无效输入错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 创建数值故障错误
    pub fn numerical(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Numerical {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// 是否为数值故障
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::Numerical { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerical_error_names_stage() {
        let err = AmError::numerical("predictor-flux-x2", "负压强 p=-1.2e-3");
        let msg = err.to_string();
        assert!(msg.contains("predictor-flux-x2"));
        assert!(err.is_numerical());
    }

    #[test]
    fn test_config_error() {
        let err = AmError::config("ghost 层数不足");
        assert!(!err.is_numerical());
        assert!(err.to_string().contains("ghost"));
    }
}
