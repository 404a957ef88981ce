// crates/am_physics/src/schemes/riemann/hlle.rs

//! HLLE 近似黎曼求解器
//!
//! 双波近似，信号速度界取 Davis 估计与 Roe 平均速度估计的外包络，
//! 对全部磁流体波速范围稳定。不分辨接触间断，作为强激波下的
//! 稳健默认求解器。
//!
//! # 核心算法
//!
//! ```text
//! bp = max(0, uL + cfL, uR + cfR, uRoe + max(cfL, cfR), eta_h)
//! bm = min(0, uL − cfL, uR − cfR, uRoe − max(cfL, cfR), −eta_h)
//! F  = (bp·FL − bm·FR + bp·bm·(UR − UL)) / (bp − bm)
//! ```
//!
//! `eta_h` 只向外拓宽信号界，左右状态相同时通量与 `eta_h` 无关。

use super::traits::{physical_flux, RiemannError, RiemannSolver, SolverCapabilities};
use crate::eos::EquationOfState;
use crate::state::{Cons1D, Prim1D};
use am_foundation::Real;

/// HLLE 求解器
#[derive(Debug, Clone, Copy)]
pub struct Hlle {
    eos: EquationOfState,
}

impl Hlle {
    /// 创建求解器
    pub fn new(eos: EquationOfState) -> Self {
        Self { eos }
    }

    /// Roe 平均法向速度（密度平方根加权）
    #[inline]
    fn roe_velocity(wl: &Prim1D, wr: &Prim1D) -> Real {
        let sl = wl.d.sqrt();
        let sr = wr.d.sqrt();
        (sl * wl.vx + sr * wr.vx) / (sl + sr)
    }
}

impl RiemannSolver for Hlle {
    fn name(&self) -> &'static str {
        "HLLE"
    }

    fn capabilities(&self) -> SolverCapabilities {
        SolverCapabilities {
            handles_mhd: true,
            contact_resolving: false,
            dissipation_floor: true,
        }
    }

    fn solve(
        &self,
        ul: &Cons1D,
        ur: &Cons1D,
        wl: &Prim1D,
        wr: &Prim1D,
        bn: Real,
        eta_h: Real,
    ) -> Result<Cons1D, RiemannError> {
        if !(wl.d > 0.0) || !(wr.d > 0.0) {
            return Err(RiemannError::InvalidInput {
                message: format!("非正密度: dL={:e} dR={:e}", wl.d, wr.d),
            });
        }

        let cfl = self.eos.cfast(wl, bn);
        let cfr = self.eos.cfast(wr, bn);
        let cmax = cfl.max(cfr);
        let uroe = Self::roe_velocity(wl, wr);

        let mut bp = (wl.vx + cfl).max(wr.vx + cfr).max(uroe + cmax).max(0.0);
        let mut bm = (wl.vx - cfl).min(wr.vx - cfr).min(uroe - cmax).min(0.0);
        bp = bp.max(eta_h);
        bm = bm.min(-eta_h);

        let denom = bp - bm;
        if !(denom > 0.0) || !denom.is_finite() {
            return Err(RiemannError::Numerical {
                message: format!("信号速度界退化: bp={:e} bm={:e}", bp, bm),
            });
        }

        let fl = physical_flux(ul, wl, bn, &self.eos);
        let fr = physical_flux(ur, wr, bn, &self.eos);
        let f = (fl * bp - fr * bm + (*ur - *ul) * (bp * bm)) * (1.0 / denom);

        if !f.is_finite() {
            return Err(RiemannError::Numerical {
                message: "通量出现非有限分量".to_string(),
            });
        }
        Ok(f)
    }
}
