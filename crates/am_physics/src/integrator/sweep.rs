// crates/am_physics/src/integrator/sweep.rs

//! 方向参数化的通量扫掠
//!
//! 三个坐标方向共用同一套扫掠例程，方向差异由 [`Permutation`]
//! 携带。每条网格线装载为一维线状态后交给重构与黎曼求解器；
//! 通量按置换分量写入该方向的面通量数组（面 `l` 位于单元 `l-1`
//! 与 `l` 之间）。
//!
//! 扫掠假定 ghost 层已被外部边界例程填充，自身不做任何边界处理。

use super::workspace::LineBuffers;
use super::Bounds;
use crate::eos::EquationOfState;
use crate::numerics::reconstruction::Reconstruction;
use crate::schemes::riemann::RiemannSolver;
use crate::state::{Cons1D, Prim1D};
use crate::types::Direction;
use am_foundation::{AmError, AmResult, Array3};
use am_grid::{ConservedField, FaceField};

/// 预报步的一阶通量
///
/// 界面状态直接取相邻单元的守恒值转原始，不做重构。同时把持久
/// 面磁场快照进半步面场，作为后续 CT 半步更新的起点。
#[allow(clippy::too_many_arguments)]
pub(crate) fn first_order_fluxes(
    dir: Direction,
    u: &ConservedField,
    bface: Option<&FaceField>,
    bhalf: Option<&mut FaceField>,
    flux: &mut Array3<Cons1D>,
    line: &mut LineBuffers,
    eos: &EquationOfState,
    riemann: &dyn RiemannSolver,
    b: &Bounds,
) -> AmResult<()> {
    let stage = format!("predictor-flux-{}", dir.tag());
    let p = dir.perm();
    let (a_ax, b_ax) = p.outer_axes();
    let ra = b.full[a_ax];
    let rb = b.full[b_ax];
    let rl = b.full[p.n];
    let n_scalars = u.cfg().n_scalars;

    // 持久面磁场快照到半步面场
    if let (Some(bf), Some(bh)) = (bface, bhalf) {
        let src = bf.component(p.n);
        let dst = bh.component_mut(p.n);
        for a in ra.range() {
            for bb in rb.range() {
                for l in rl.range() {
                    let c = p.cell(a, bb, l);
                    dst[c] = src[c];
                }
            }
        }
    }

    let bn_arr = bface.map(|bf| bf.component(p.n));
    for a in ra.range() {
        for bb in rb.range() {
            for l in (rl.lo + 1)..=rl.hi {
                line.ul[l] = p.gather_cons(u, p.cell(a, bb, l - 1), n_scalars);
                line.ur[l] = p.gather_cons(u, p.cell(a, bb, l), n_scalars);
            }
            for l in (rl.lo + 1)..=rl.hi {
                let c = p.cell(a, bb, l);
                let bn = bn_arr.map_or(0.0, |arr| arr[c]);
                let wl = eos.cons_to_prim(&line.ul[l], bn);
                let wr = eos.cons_to_prim(&line.ur[l], bn);
                eos.validate_prim(&wl)
                    .map_err(|m| AmError::numerical(stage.as_str(), m))?;
                eos.validate_prim(&wr)
                    .map_err(|m| AmError::numerical(stage.as_str(), m))?;
                flux[c] = riemann
                    .solve(&line.ul[l], &line.ur[l], &wl, &wr, bn, 0.0)
                    .map_err(|e| AmError::numerical(stage.as_str(), e.to_string()))?;
            }
        }
    }
    Ok(())
}

/// 校正步的界面重构
///
/// 从半步守恒态装线、转原始、交给注入的重构器，左右界面状态
/// 写入该方向的面状态数组。
pub(crate) fn reconstruct_faces(
    dir: Direction,
    uhalf: &ConservedField,
    wl_face: &mut Array3<Prim1D>,
    wr_face: &mut Array3<Prim1D>,
    line: &mut LineBuffers,
    eos: &EquationOfState,
    recon: &dyn Reconstruction,
    b: &Bounds,
) -> AmResult<()> {
    let stage = format!("corrector-recon-{}", dir.tag());
    let p = dir.perm();
    let (a_ax, b_ax) = p.outer_axes();
    let ra = b.ord[a_ax];
    let rb = b.ord[b_ax];
    let rl = b.ord[p.n];
    let fl = b.full[p.n];
    let n_scalars = uhalf.cfg().n_scalars;
    let bxc_arr = uhalf.bcc(p.n);

    for a in ra.range() {
        for bb in rb.range() {
            for l in fl.range() {
                let c = p.cell(a, bb, l);
                line.u1d[l] = p.gather_cons(uhalf, c, n_scalars);
                line.bxc[l] = bxc_arr.map_or(0.0, |arr| arr[c]);
            }
            for l in fl.range() {
                line.w1d[l] = eos.cons_to_prim(&line.u1d[l], line.bxc[l]);
                eos.validate_prim(&line.w1d[l])
                    .map_err(|m| AmError::numerical(stage.as_str(), m))?;
            }
            recon.reconstruct(&line.w1d, rl.lo + 1, rl.hi - 1, &mut line.wl, &mut line.wr);
            for l in (rl.lo + 1)..=rl.hi {
                let c = p.cell(a, bb, l);
                wl_face[c] = line.wl[l];
                wr_face[c] = line.wr[l];
            }
        }
    }
    Ok(())
}

/// 校正步的全通量
///
/// 用重构的界面状态计算面通量；启用 H 修正时把面的模板耗散
/// 下限传给求解器。
#[allow(clippy::too_many_arguments)]
pub(crate) fn corrected_fluxes(
    dir: Direction,
    flux: &mut Array3<Cons1D>,
    wl_face: &Array3<Prim1D>,
    wr_face: &Array3<Prim1D>,
    bhalf: Option<&FaceField>,
    eta: Option<&[Array3<am_foundation::Real>; 3]>,
    eos: &EquationOfState,
    riemann: &dyn RiemannSolver,
    b: &Bounds,
) -> AmResult<()> {
    let stage = format!("corrector-flux-{}", dir.tag());
    let p = dir.perm();
    let (a_ax, b_ax) = p.outer_axes();
    let bn_arr = bhalf.map(|bf| bf.component(p.n));

    for a in b.ord[a_ax].range() {
        for bb in b.ord[b_ax].range() {
            for l in (b.ord[p.n].lo + 1)..=b.ord[p.n].hi {
                let c = p.cell(a, bb, l);
                let eta_h = eta.map_or(0.0, |e| super::hcorr::stencil_eta(e, dir, c));
                let bn = bn_arr.map_or(0.0, |arr| arr[c]);
                let wl = &wl_face[c];
                let wr = &wr_face[c];
                let ul = eos.prim_to_cons(wl, bn);
                let ur = eos.prim_to_cons(wr, bn);
                flux[c] = riemann
                    .solve(&ul, &ur, wl, wr, bn, eta_h)
                    .map_err(|e| AmError::numerical(stage.as_str(), e.to_string()))?;
            }
        }
    }
    Ok(())
}
