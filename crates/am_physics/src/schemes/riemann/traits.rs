// crates/am_physics/src/schemes/riemann/traits.rs

//! 黎曼求解器统一接口
//!
//! 求解器把界面两侧的守恒/原始状态转换为一个守恒的数值通量。
//! 接口对求解器内部算法不作假设，但要求:
//!
//! - **守恒性**: 每个面对每个守恒量只产生一个通量值，符号约定
//!   与扫掠方向一致
//! - **稳定性**: 对物理允许的全部波速范围稳定
//! - **耗散下限**: `eta_h` 给出多维耗散的波速下限，求解器用它
//!   向外拓宽信号速度界；传 0 表示无额外耗散

use crate::eos::EquationOfState;
use crate::state::{Cons1D, Prim1D};
use am_foundation::Real;
use am_grid::MAX_SCALARS;

/// 求解器能力标志
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverCapabilities {
    /// 是否处理磁场
    pub handles_mhd: bool,
    /// 是否分辨接触间断
    pub contact_resolving: bool,
    /// 是否接受多维耗散下限
    pub dissipation_floor: bool,
}

/// 黎曼求解器 trait
pub trait RiemannSolver: Send + Sync {
    /// 求解器名称
    fn name(&self) -> &'static str;

    /// 求解器能力
    fn capabilities(&self) -> SolverCapabilities;

    /// 求解黎曼问题
    ///
    /// # 参数
    /// - `ul` / `ur`: 界面左/右守恒状态
    /// - `wl` / `wr`: 界面左/右原始状态
    /// - `bn`: 面法向磁场（纯流体传 0）
    /// - `eta_h`: 多维耗散的波速下限（未启用传 0）
    ///
    /// # 返回
    /// 界面数值通量
    fn solve(
        &self,
        ul: &Cons1D,
        ur: &Cons1D,
        wl: &Prim1D,
        wr: &Prim1D,
        bn: Real,
        eta_h: Real,
    ) -> Result<Cons1D, RiemannError>;
}

/// 黎曼求解器错误
#[derive(Debug, Clone)]
pub enum RiemannError {
    /// 数值错误
    Numerical {
        /// 描述信息
        message: String,
    },
    /// 无效输入
    InvalidInput {
        /// 描述信息
        message: String,
    },
}

impl std::fmt::Display for RiemannError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numerical { message } => write!(f, "Numerical error: {}", message),
            Self::InvalidInput { message } => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for RiemannError {}

/// 沿法向的物理通量
///
/// 切向磁场通量即边电动势分量:
/// `f.by = vx·by − bx·vy`, `f.bz = vx·bz − bx·vz`。
/// 被动标量随质量通量输运。
pub fn physical_flux(u: &Cons1D, w: &Prim1D, bx: Real, eos: &EquationOfState) -> Cons1D {
    let ptot = w.p + 0.5 * (bx * bx + w.by * w.by + w.bz * w.bz);
    let e = if eos.is_adiabatic() {
        (u.e + ptot) * w.vx - bx * (w.vx * bx + w.vy * w.by + w.vz * w.bz)
    } else {
        0.0
    };
    let mut s = [0.0; MAX_SCALARS];
    for n in 0..MAX_SCALARS {
        s[n] = u.mx * w.s[n];
    }
    Cons1D {
        d: u.mx,
        mx: u.mx * w.vx + ptot - bx * bx,
        my: u.my * w.vx - bx * w.by,
        mz: u.mz * w.vx - bx * w.bz,
        e,
        by: w.by * w.vx - bx * w.vy,
        bz: w.bz * w.vx - bx * w.vz,
        s,
    }
}
