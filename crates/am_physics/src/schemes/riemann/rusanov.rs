// crates/am_physics/src/schemes/riemann/rusanov.rs

//! Rusanov (局部 Lax-Friedrichs) 求解器
//!
//! 单一耗散速度取两侧最大信号速度，是最耗散也最稳健的通量。
//! 用于调试对照与极端工况兜底。
//!
//! # 核心算法
//!
//! ```text
//! a = max(|uL| + cfL, |uR| + cfR, eta_h)
//! F = 0.5·(FL + FR) − 0.5·a·(UR − UL)
//! ```

use super::traits::{physical_flux, RiemannError, RiemannSolver, SolverCapabilities};
use crate::eos::EquationOfState;
use crate::state::{Cons1D, Prim1D};
use am_foundation::Real;

/// Rusanov 求解器
#[derive(Debug, Clone, Copy)]
pub struct Rusanov {
    eos: EquationOfState,
}

impl Rusanov {
    /// 创建求解器
    pub fn new(eos: EquationOfState) -> Self {
        Self { eos }
    }
}

impl RiemannSolver for Rusanov {
    fn name(&self) -> &'static str {
        "Rusanov"
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
        let a = (wl.vx.abs() + cfl).max(wr.vx.abs() + cfr).max(eta_h);

        let fl = physical_flux(ul, wl, bn, &self.eos);
        let fr = physical_flux(ur, wr, bn, &self.eos);
        let f = (fl + fr) * 0.5 - (*ur - *ul) * (0.5 * a);

        if !f.is_finite() {
            return Err(RiemannError::Numerical {
                message: "通量出现非有限分量".to_string(),
            });
        }
        Ok(f)
    }
}
