// crates/am_physics/src/timestep.rs

//! CFL 时间步估计
//!
//! 对块内部单元求三个方向的最大信号传播率
//! `(|v_d| + c_f,d) / dx_d`，时间步取 `cfl / max`。
//! 逐 k 层并行归约。积分器本身把 dt 当作不透明元数据，
//! 估计器只是驱动层的配套工具。

use crate::eos::EquationOfState;
use crate::types::Permutation;
use am_foundation::Real;
use am_grid::MeshBlock;
use rayon::prelude::*;

/// CFL 时间步估计器
#[derive(Debug, Clone, Copy)]
pub struct CflEstimator {
    /// CFL 数
    pub cfl: Real,
    /// 最小时间步
    pub dt_min: Real,
    /// 最大时间步
    pub dt_max: Real,
}

impl Default for CflEstimator {
    fn default() -> Self {
        Self {
            cfl: 0.4,
            dt_min: 1.0e-12,
            dt_max: 1.0e3,
        }
    }
}

impl CflEstimator {
    /// 创建估计器
    pub fn new(cfl: Real) -> Self {
        Self {
            cfl,
            ..Self::default()
        }
    }

    /// 计算一个块的时间步
    pub fn compute(&self, blk: &MeshBlock, eos: &EquationOfState) -> Real {
        let ir = blk.interior(0);
        let jr = blk.interior(1);
        let kr = blk.interior(2);
        let n_scalars = blk.u.cfg().n_scalars;
        let dx = blk.dx;
        let u = &blk.u;

        let max_rate = kr
            .range()
            .into_par_iter()
            .map(|k| {
                let mut slab_max: Real = 0.0;
                for j in jr.range() {
                    for i in ir.range() {
                        let c = [k, j, i];
                        for axis in 0..3 {
                            let p = Permutation::of_axis(axis);
                            let q = p.gather_cons(u, c, n_scalars);
                            let bn = u.bcc(axis).map_or(0.0, |b| b[c]);
                            let w = eos.cons_to_prim(&q, bn);
                            let rate = (w.vx.abs() + eos.cfast(&w, bn)) / dx[axis];
                            slab_max = slab_max.max(rate);
                        }
                    }
                }
                slab_max
            })
            .reduce(|| 0.0, Real::max);

        if max_rate <= 0.0 {
            return self.dt_max;
        }
        (self.cfl / max_rate).clamp(self.dt_min, self.dt_max)
    }

    /// 多个块取最小时间步
    pub fn compute_all(&self, blocks: &[MeshBlock], eos: &EquationOfState) -> Real {
        blocks
            .iter()
            .map(|b| self.compute(b, eos))
            .fold(self.dt_max, Real::min)
    }
}
