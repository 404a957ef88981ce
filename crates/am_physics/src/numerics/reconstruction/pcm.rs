// crates/am_physics/src/numerics/reconstruction/pcm.rs

//! 分片常数重构
//!
//! 界面状态直接取相邻单元值，一阶精度。用于对照测试与
//! 需要最大稳定性的配置。

use super::traits::Reconstruction;
use crate::state::Prim1D;

/// 分片常数重构器
#[derive(Debug, Clone, Copy, Default)]
pub struct PiecewiseConstant;

impl PiecewiseConstant {
    /// 创建重构器
    pub fn new() -> Self {
        Self
    }
}

impl Reconstruction for PiecewiseConstant {
    fn name(&self) -> &'static str {
        "PCM"
    }

    fn stencil_width(&self) -> usize {
        1
    }

    fn reconstruct(&self, w: &[Prim1D], lo: usize, hi: usize, wl: &mut [Prim1D], wr: &mut [Prim1D]) {
        for c in (lo - 1)..=(hi + 1) {
            wl[c + 1] = w[c];
            wr[c] = w[c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm_copies_cells() {
        let mut w = vec![Prim1D::default(); 8];
        for (i, wi) in w.iter_mut().enumerate() {
            wi.d = i as f64;
        }
        let mut wl = vec![Prim1D::default(); 8];
        let mut wr = vec![Prim1D::default(); 8];
        PiecewiseConstant::new().reconstruct(&w, 2, 5, &mut wl, &mut wr);
        // 面 f 的左状态来自单元 f-1，右状态来自单元 f
        for f in 2..=6 {
            assert_eq!(wl[f].d, (f - 1) as f64);
            assert_eq!(wr[f].d, f as f64);
        }
    }
}
