// crates/am_grid/src/boundary.rs

//! ghost 区填充
//!
//! 积分器假定扫掠开始前 ghost 层已被填充，本模块提供驱动程序与
//! 测试使用的两种填充方式：周期与外流（零梯度）。逐轴依次应用，
//! 后填充的轴会覆盖角区 ghost，得到一致的角区值。
//!
//! 面心磁场沿自身法向按面的周期对齐（面 `lo` 与面 `hi + 1` 是同
//! 一物理面），横向方向与单元量同样处理。

use crate::block::MeshBlock;
use am_foundation::{Array3, Real};
use serde::{Deserialize, Serialize};

/// 边界填充方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// 周期边界
    Periodic,
    /// 外流（零梯度）边界
    Outflow,
}

/// 对块的全部持久场逐轴应用 ghost 填充
///
/// `kinds[axis]` 同时作用于该轴的两端。周期填充要求该轴内部格数
/// 不少于 ghost 层数。
pub fn apply_boundary(blk: &mut MeshBlock, kinds: [BoundaryKind; 3]) {
    let ng = blk.nghost();
    for axis in 0..3 {
        let n = blk.nx(axis);
        let kind = kinds[axis];
        if kind == BoundaryKind::Periodic {
            debug_assert!(n >= ng, "周期填充要求 nx >= nghost");
        }

        fill_cell(&mut blk.u.d, axis, ng, n, kind);
        fill_cell(&mut blk.u.m1, axis, ng, n, kind);
        fill_cell(&mut blk.u.m2, axis, ng, n, kind);
        fill_cell(&mut blk.u.m3, axis, ng, n, kind);
        if let Some(e) = blk.u.e.as_mut() {
            fill_cell(e, axis, ng, n, kind);
        }
        if let Some(bc) = blk.u.bc.as_mut() {
            for b in bc.iter_mut() {
                fill_cell(b, axis, ng, n, kind);
            }
        }
        for s in blk.u.s.iter_mut() {
            fill_cell(s, axis, ng, n, kind);
        }
        if let Some(phi) = blk.phi.as_mut() {
            fill_cell(phi, axis, ng, n, kind);
        }

        if let Some(bf) = blk.bface.as_mut() {
            for comp in 0..3 {
                if comp == axis {
                    fill_face_normal(bf.component_mut(comp), axis, ng, n, kind);
                } else {
                    fill_cell(bf.component_mut(comp), axis, ng, n, kind);
                }
            }
        }
    }
}

/// 把轴向坐标 `c` 与两个正交坐标 `(p, q)` 组装成 `[k, j, i]`
///
/// p 取较高编号的正交轴，q 取较低编号的正交轴。
#[inline]
fn make_index(axis: usize, p: usize, q: usize, c: usize) -> [usize; 3] {
    match axis {
        0 => [p, q, c],
        1 => [p, c, q],
        _ => [c, p, q],
    }
}

/// 正交平面的维度 `(np, nq)`
#[inline]
fn ortho_dims(dims: [usize; 3], axis: usize) -> (usize, usize) {
    match axis {
        0 => (dims[0], dims[1]),
        1 => (dims[0], dims[2]),
        _ => (dims[1], dims[2]),
    }
}

/// 单元量（以及面量的横向方向）的逐轴填充
fn fill_cell(a: &mut Array3<Real>, axis: usize, ng: usize, n: usize, kind: BoundaryKind) {
    let (np, nq) = ortho_dims(a.dims(), axis);
    for p in 0..np {
        for q in 0..nq {
            for g in 0..ng {
                let (lo_src, hi_src) = match kind {
                    BoundaryKind::Periodic => (g + n, ng + g),
                    BoundaryKind::Outflow => (ng, ng + n - 1),
                };
                a[make_index(axis, p, q, g)] = a[make_index(axis, p, q, lo_src)];
                a[make_index(axis, p, q, ng + n + g)] = a[make_index(axis, p, q, hi_src)];
            }
        }
    }
}

/// 面心量沿自身法向的填充
///
/// 有效面索引为 `[ng, ng + n]`；周期时 ghost 面以 n 为周期对齐。
fn fill_face_normal(a: &mut Array3<Real>, axis: usize, ng: usize, n: usize, kind: BoundaryKind) {
    let (np, nq) = ortho_dims(a.dims(), axis);
    let nt = match axis {
        0 => a.dims()[2],
        1 => a.dims()[1],
        _ => a.dims()[0],
    };
    for p in 0..np {
        for q in 0..nq {
            // 低端 ghost 面
            for c in 0..ng {
                let src = match kind {
                    BoundaryKind::Periodic => c + n,
                    BoundaryKind::Outflow => ng,
                };
                a[make_index(axis, p, q, c)] = a[make_index(axis, p, q, src)];
            }
            // 高端 ghost 面（有效范围之上）
            for c in (ng + n + 1)..nt {
                let src = match kind {
                    BoundaryKind::Periodic => c - n,
                    BoundaryKind::Outflow => ng + n,
                };
                a[make_index(axis, p, q, c)] = a[make_index(axis, p, q, src)];
            }
        }
    }
}
