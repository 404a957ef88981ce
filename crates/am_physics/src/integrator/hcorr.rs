// crates/am_physics/src/integrator/hcorr.rs

//! 多维耗散系数（H 修正）
//!
//! 强激波沿网格传播时，一维黎曼求解器在横向方向缺少耗散，会触发
//! 奇偶失稳。H 修正在每个面上记录重构左右状态的信号速度张开量
//!
//! ```text
//! eta = 0.5 · |(uR + cfR) − (uL − cfL)|
//! ```
//!
//! 取该面所在方向与两个横向方向相邻面的最大值作为耗散下限，仅
//! 在本次校正步对该面的通量求解生效，用后即弃。

use super::Bounds;
use crate::eos::EquationOfState;
use crate::state::Prim1D;
use crate::types::Direction;
use am_foundation::{Array3, Real};
use am_grid::FaceField;

/// 计算三个方向的每面信号速度张开量
///
/// 先整体清零再填充，模板在计算范围边缘读到的零值不影响最大值
/// 选择。
pub(crate) fn compute_eta(
    eta: &mut [Array3<Real>; 3],
    wl_face: &[Array3<Prim1D>; 3],
    wr_face: &[Array3<Prim1D>; 3],
    bhalf: Option<&FaceField>,
    eos: &EquationOfState,
    b: &Bounds,
) {
    for arr in eta.iter_mut() {
        arr.fill(0.0);
    }
    for dir in Direction::ALL {
        let d = dir.axis();
        let p = dir.perm();
        let (a_ax, b_ax) = p.outer_axes();
        let bn_arr = bhalf.map(|bf| bf.component(d));
        for a in b.ord[a_ax].range() {
            for bb in b.ord[b_ax].range() {
                for l in (b.ord[d].lo + 1)..=b.ord[d].hi {
                    let c = p.cell(a, bb, l);
                    let wl = &wl_face[d][c];
                    let wr = &wr_face[d][c];
                    let bn = bn_arr.map_or(0.0, |arr| arr[c]);
                    let lam_r = wr.vx + eos.cfast(wr, bn);
                    let lam_l = wl.vx - eos.cfast(wl, bn);
                    eta[d][c] = 0.5 * (lam_r - lam_l).abs();
                }
            }
        }
    }
}

/// 面的模板耗散下限
///
/// 取本面与相邻横向面的 eta 最大值，模板与方向相关。
pub(crate) fn stencil_eta(eta: &[Array3<Real>; 3], dir: Direction, c: [usize; 3]) -> Real {
    let [k, j, i] = c;
    match dir {
        Direction::X1 => eta[1][[k, j, i - 1]]
            .max(eta[1][[k, j, i]])
            .max(eta[1][[k, j + 1, i - 1]])
            .max(eta[1][[k, j + 1, i]])
            .max(eta[2][[k, j, i - 1]])
            .max(eta[2][[k, j, i]])
            .max(eta[2][[k + 1, j, i - 1]])
            .max(eta[2][[k + 1, j, i]])
            .max(eta[0][[k, j, i]]),
        Direction::X2 => eta[0][[k, j - 1, i]]
            .max(eta[0][[k, j, i]])
            .max(eta[0][[k, j - 1, i + 1]])
            .max(eta[0][[k, j, i + 1]])
            .max(eta[2][[k, j - 1, i]])
            .max(eta[2][[k, j, i]])
            .max(eta[2][[k + 1, j - 1, i]])
            .max(eta[2][[k + 1, j, i]])
            .max(eta[1][[k, j, i]]),
        Direction::X3 => eta[0][[k - 1, j, i]]
            .max(eta[0][[k, j, i]])
            .max(eta[0][[k - 1, j, i + 1]])
            .max(eta[0][[k, j, i + 1]])
            .max(eta[1][[k - 1, j, i]])
            .max(eta[1][[k, j, i]])
            .max(eta[1][[k - 1, j + 1, i]])
            .max(eta[1][[k, j + 1, i]])
            .max(eta[2][[k, j, i]]),
    }
}
