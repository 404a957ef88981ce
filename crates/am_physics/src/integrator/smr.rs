// crates/am_physics/src/integrator/smr.rs

//! 细化边界寄存器填充
//!
//! 校正步结束后，把每个细化链接共享面上的全步通量与包络边
//! 电动势快照进链接的寄存器。只做索引重映射（扫掠置换还原为
//! 全局动量方位，块索引空间映射为面内局部二维坐标），不做任何
//! 数值变换；粗细面通量的守恒协调由外部步骤完成。
//!
//! 没有链接的面不被触碰。

use super::workspace::EmfBuffers;
use crate::state::Cons1D;
use crate::types::Permutation;
use am_foundation::Array3;
use am_grid::{FieldConfig, SmrLink};

/// 面上单元坐标组装: 法向取面索引，横向取窗口坐标
#[inline]
fn cell_at(axis: usize, face: usize, t_lo: usize, l: usize, t_hi: usize, h: usize) -> [usize; 3] {
    let mut coord = [0usize; 3];
    coord[axis] = face;
    coord[t_lo] = l;
    coord[t_hi] = h;
    [coord[2], coord[1], coord[0]]
}

/// 填充全部链接的寄存器
pub(crate) fn fill_registers(
    links: &mut [SmrLink],
    flux: &[Array3<Cons1D>; 3],
    emf: Option<&EmfBuffers>,
    cfg: &FieldConfig,
) {
    for link in links.iter_mut() {
        let d = link.face.axis();
        let p = Permutation::of_axis(d);
        let f = link.face_index();
        let (t_lo, t_hi) = link.face.transverse();
        let w_lo = link.window[t_lo];
        let w_hi = link.window[t_hi];
        let reg = &mut link.reg;

        for (hh, h) in w_hi.range().enumerate() {
            for (ll, l) in w_lo.range().enumerate() {
                let c = cell_at(d, f, t_lo, l, t_hi, h);
                let fv = flux[d][c];
                let pi = [hh, ll];
                reg.d[pi] = fv.d;
                // 扫掠置换还原为全局动量方位
                reg.momentum_mut(p.n)[pi] = fv.mx;
                reg.momentum_mut(p.t1)[pi] = fv.my;
                reg.momentum_mut(p.t2)[pi] = fv.mz;
                if let Some(e) = reg.e.as_mut() {
                    e[pi] = fv.e;
                }
                if let Some(b) = reg.b.as_mut() {
                    b[p.n][pi] = 0.0;
                    b[p.t1][pi] = fv.by;
                    b[p.t2][pi] = fv.bz;
                }
                for n in 0..cfg.n_scalars {
                    reg.s[n][pi] = fv.s[n];
                }
            }
        }

        if let (Some(patches), Some(emfb)) = (reg.emf.as_mut(), emf) {
            // 沿低横向轴的电动势: 高轴方向多一层
            let e_lo = emfb.component(t_lo);
            for (hh, h) in (w_hi.lo..=(w_hi.hi + 1)).enumerate() {
                for (ll, l) in w_lo.range().enumerate() {
                    patches[0][[hh, ll]] = e_lo[cell_at(d, f, t_lo, l, t_hi, h)];
                }
            }
            // 沿高横向轴的电动势: 低轴方向多一层
            let e_hi = emfb.component(t_hi);
            for (hh, h) in w_hi.range().enumerate() {
                for (ll, l) in (w_lo.lo..=(w_lo.hi + 1)).enumerate() {
                    patches[1][[hh, ll]] = e_hi[cell_at(d, f, t_lo, l, t_hi, h)];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_orientation() {
        // x1 面: 法向 i = face, 低横向 j, 高横向 k
        assert_eq!(cell_at(0, 4, 1, 6, 2, 7), [7, 6, 4]);
        // x2 面: 法向 j = face, 低横向 i, 高横向 k
        assert_eq!(cell_at(1, 5, 0, 6, 2, 7), [7, 5, 6]);
        // x3 面: 法向 k = face, 低横向 i, 高横向 j
        assert_eq!(cell_at(2, 5, 0, 6, 1, 7), [5, 7, 6]);
    }
}
