// crates/am_physics/src/numerics/reconstruction/plm.rs

//! 单调中心限制的分片线性重构
//!
//! 对原始变量逐分量计算限制斜率，向面外推半格，二阶精度。
//!
//! # 算法
//!
//! 斜率取单调中心 (MC) 限制:
//!
//! ```text
//! Δl = q_i − q_{i−1},  Δr = q_{i+1} − q_i,  Δc = (Δl + Δr)/2
//!
//!          ⎧ sign(Δc)·min(|Δc|, 2|Δl|, 2|Δr|)   Δl·Δr > 0
//! Δq_i  =  ⎨
//!          ⎩ 0                                   其他
//! ```
//!
//! 局部极值处斜率归零，间断处退化为一阶。均匀线上斜率恰为零，
//! 重构退化为逐位的单元值拷贝。

use super::traits::Reconstruction;
use crate::state::Prim1D;
use am_foundation::Real;

/// 分片线性重构器
#[derive(Debug, Clone, Copy, Default)]
pub struct PiecewiseLinear;

impl PiecewiseLinear {
    /// 创建重构器
    pub fn new() -> Self {
        Self
    }

    /// 单调中心限制斜率
    #[inline]
    fn mc_slope(qm: Real, q0: Real, qp: Real) -> Real {
        let dl = q0 - qm;
        let dr = qp - q0;
        if dl * dr <= 0.0 {
            return 0.0;
        }
        let dc = 0.5 * (dl + dr);
        let lim = (2.0 * dl.abs()).min(2.0 * dr.abs()).min(dc.abs());
        if dc > 0.0 {
            lim
        } else {
            -lim
        }
    }
}

impl Reconstruction for PiecewiseLinear {
    fn name(&self) -> &'static str {
        "PLM"
    }

    fn stencil_width(&self) -> usize {
        2
    }

    fn reconstruct(&self, w: &[Prim1D], lo: usize, hi: usize, wl: &mut [Prim1D], wr: &mut [Prim1D]) {
        for c in (lo - 1)..=(hi + 1) {
            let dw = Prim1D::map3(&w[c - 1], &w[c], &w[c + 1], Self::mc_slope);
            wl[c + 1] = Prim1D::map2(&w[c], &dw, |q, d| q + 0.5 * d);
            wr[c] = Prim1D::map2(&w[c], &dw, |q, d| q - 0.5 * d);
        }
    }
}
