// crates/am_foundation/src/lib.rs

//! AstroMHD Foundation Layer
//!
//! 零物理依赖的基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `AmError` / `AmResult`
//! - [`array`]: 连续内存的二维/三维数组容器
//! - [`index`]: 闭区间索引范围（网格循环边界的唯一表达方式）
//! - [`tolerance`]: 数值容差常量
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde、thiserror 和 bytemuck
//! 2. **单一所有权**: 所有缓冲区由唯一所有者持有，不共享可变状态
//! 3. **显式边界**: 数组的每个方向都携带显式范围，循环边界不靠约定
//!
//! # 示例
//!
//! ```
//! use am_foundation::{array::Array3, index::IndexRange, Real};
//!
//! let mut a: Array3<Real> = Array3::zeros(4, 4, 8);
//! a[[1, 2, 3]] = 5.0;
//! assert_eq!(a[[1, 2, 3]], 5.0);
//!
//! let r = IndexRange::new(2, 5);
//! assert_eq!(r.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod index;
pub mod tolerance;

/// 全局浮点精度
///
/// 整个求解器统一使用双精度。
pub type Real = f64;

// 重导出常用类型
pub use array::{Array2, Array3};
pub use error::{AmError, AmResult};
pub use index::IndexRange;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::array::{Array2, Array3};
    pub use crate::error::{AmError, AmResult};
    pub use crate::index::IndexRange;
    pub use crate::Real;
}
