// crates/am_physics/src/lib.rs

//! AstroMHD Physics Layer
//!
//! 理想磁流体方程的有限体积物理层，核心是方向非分裂的
//! 预报-校正（van Leer / MUSCL-Hancock）积分器，配合约束输运
//! 维持面心磁场的零散度。
//!
//! # 模块概览
//!
//! - [`types`]: 方向置换描述子与积分器配置
//! - [`state`]: 一维线状态（守恒 / 原始变量）
//! - [`eos`]: 状态方程与变量转换
//! - [`schemes`]: 黎曼求解器（HLLE、Rusanov）
//! - [`numerics`]: 斜率限制重构
//! - [`gravity`]: 引力势策略接口与自引力参数
//! - [`timestep`]: CFL 时间步估计
//! - [`integrator`]: 非分裂积分器核心（工作区、扫掠、角点电动势、
//!   H 修正、引力源项、细化边界寄存器交换）
//!
//! # 推进流程
//!
//! 每次调用推进一个网格块一个时间步：
//!
//! ```text
//! 预报: 一阶扫掠 x1/x2/x3 → 角点电动势 → CT 半步 → 半步守恒更新 → 引力(半步)
//! 校正: 二阶重构 x1/x2/x3 → [H 修正] → 全通量 → 角点电动势 → CT 全步
//!       → 引力(全步) → 全步守恒更新提交 → 单元中心磁场平均
//! 随后: 细化边界通量/电动势寄存器填充
//! ```
//!
//! 持久状态只在校正步末尾被原地覆盖；任何阶段的数值故障都携带
//! 阶段名称并使本次推进整体失败。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eos;
pub mod gravity;
pub mod integrator;
pub mod numerics;
pub mod schemes;
pub mod state;
pub mod timestep;
pub mod types;

pub use eos::EquationOfState;
pub use integrator::{IntegratorWorkspace, VlIntegrator3d};
pub use state::{Cons1D, Prim1D};
pub use types::{Direction, IntegratorConfig, Permutation};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::eos::EquationOfState;
    pub use crate::gravity::{
        LinearPotential, PointMassPotential, SelfGravityParams, StaticPotential,
    };
    pub use crate::integrator::{IntegratorWorkspace, VlIntegrator3d};
    pub use crate::numerics::reconstruction::{PiecewiseConstant, PiecewiseLinear, Reconstruction};
    pub use crate::schemes::riemann::{Hlle, RiemannSolver, Rusanov};
    pub use crate::state::{Cons1D, Prim1D};
    pub use crate::timestep::CflEstimator;
    pub use crate::types::{Direction, IntegratorConfig, Permutation};
}
