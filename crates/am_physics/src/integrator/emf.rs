// crates/am_physics/src/integrator/emf.rs

//! 约束输运的电动势积分
//!
//! 面通量的切向磁场分量即带符号的电动势:
//!
//! ```text
//! x1 通量: by = -E3,  bz = +E2
//! x2 通量: by = -E1,  bz = +E3
//! x3 通量: by = -E2,  bz = +E1
//! ```
//!
//! 角点电动势取四个包络面通量电动势的算术平均，再加上按局部
//! 质量通量符号迎风选择的导数修正项；质量通量为零时取两个候选
//! 导数的中心平均。迎风选择是该格式对网格对齐磁场反转保持稳定
//! 的关键。
//!
//! 面磁场更新是角点电动势的离散旋度，逐位保持六面散度为零。

use super::workspace::EmfBuffers;
use super::Bounds;
use crate::state::Cons1D;
use am_foundation::{Array3, IndexRange, Real};
use am_grid::{ConservedField, FaceField};

/// 单元中心参考电动势 `E = -v × B`
pub(crate) fn cell_centered_emfs(u: &ConservedField, emf: &mut EmfBuffers, r: &[IndexRange; 3]) {
    let Some(bc) = u.bc.as_ref() else {
        return;
    };
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let di = 1.0 / u.d[c];
                let (m1, m2, m3) = (u.m1[c], u.m2[c], u.m3[c]);
                let (b1, b2, b3) = (bc[0][c], bc[1][c], bc[2][c]);
                emf.e1_cc[c] = (b2 * m3 - b3 * m2) * di;
                emf.e2_cc[c] = (b3 * m1 - b1 * m3) * di;
                emf.e3_cc[c] = (b1 * m2 - b2 * m1) * di;
            }
        }
    }
}

/// 迎风导数选择
///
/// 质量通量为正取低侧候选，为负取高侧候选，为零取中心平均。
#[inline]
fn upwind(mass_flux: Real, lo: Real, hi: Real) -> Real {
    if mass_flux > 0.0 {
        lo
    } else if mass_flux < 0.0 {
        hi
    } else {
        0.5 * (lo + hi)
    }
}

/// 沿 x1 边的角点电动势
///
/// x2 通量的 by 是 -E1，x3 通量的 bz 是 +E1。
pub(crate) fn corner_emf1(
    emf: &mut EmfBuffers,
    f2: &Array3<Cons1D>,
    f3: &Array3<Cons1D>,
    b: &Bounds,
) {
    let (il, iu) = (b.full[0].lo, b.full[0].hi);
    let (jl, ju) = (b.full[1].lo, b.full[1].hi);
    let (kl, ku) = (b.full[2].lo, b.full[2].hi);
    for k in (kl + 1)..=ku {
        for j in (jl + 1)..=ju {
            for i in (il + 1)..=(iu - 1) {
                let de1_l3 = upwind(
                    f2[[k - 1, j, i]].d,
                    f3[[k, j - 1, i]].bz - emf.e1_cc[[k - 1, j - 1, i]],
                    f3[[k, j, i]].bz - emf.e1_cc[[k - 1, j, i]],
                );
                let de1_r3 = upwind(
                    f2[[k, j, i]].d,
                    f3[[k, j - 1, i]].bz - emf.e1_cc[[k, j - 1, i]],
                    f3[[k, j, i]].bz - emf.e1_cc[[k, j, i]],
                );
                let de1_l2 = upwind(
                    f3[[k, j - 1, i]].d,
                    -f2[[k - 1, j, i]].by - emf.e1_cc[[k - 1, j - 1, i]],
                    -f2[[k, j, i]].by - emf.e1_cc[[k, j - 1, i]],
                );
                let de1_r2 = upwind(
                    f3[[k, j, i]].d,
                    -f2[[k - 1, j, i]].by - emf.e1_cc[[k - 1, j, i]],
                    -f2[[k, j, i]].by - emf.e1_cc[[k, j, i]],
                );
                emf.e1[[k, j, i]] = 0.25
                    * (f3[[k, j, i]].bz + f3[[k, j - 1, i]].bz
                        - f2[[k, j, i]].by
                        - f2[[k - 1, j, i]].by
                        + de1_l2
                        + de1_r2
                        + de1_l3
                        + de1_r3);
            }
        }
    }
}

/// 沿 x2 边的角点电动势
///
/// x1 通量的 bz 是 +E2，x3 通量的 by 是 -E2。
pub(crate) fn corner_emf2(
    emf: &mut EmfBuffers,
    f1: &Array3<Cons1D>,
    f3: &Array3<Cons1D>,
    b: &Bounds,
) {
    let (il, iu) = (b.full[0].lo, b.full[0].hi);
    let (jl, ju) = (b.full[1].lo, b.full[1].hi);
    let (kl, ku) = (b.full[2].lo, b.full[2].hi);
    for k in (kl + 1)..=ku {
        for j in (jl + 1)..=(ju - 1) {
            for i in (il + 1)..=iu {
                let de2_l3 = upwind(
                    f1[[k - 1, j, i]].d,
                    -f3[[k, j, i - 1]].by - emf.e2_cc[[k - 1, j, i - 1]],
                    -f3[[k, j, i]].by - emf.e2_cc[[k - 1, j, i]],
                );
                let de2_r3 = upwind(
                    f1[[k, j, i]].d,
                    -f3[[k, j, i - 1]].by - emf.e2_cc[[k, j, i - 1]],
                    -f3[[k, j, i]].by - emf.e2_cc[[k, j, i]],
                );
                let de2_l1 = upwind(
                    f3[[k, j, i - 1]].d,
                    f1[[k - 1, j, i]].bz - emf.e2_cc[[k - 1, j, i - 1]],
                    f1[[k, j, i]].bz - emf.e2_cc[[k, j, i - 1]],
                );
                let de2_r1 = upwind(
                    f3[[k, j, i]].d,
                    f1[[k - 1, j, i]].bz - emf.e2_cc[[k - 1, j, i]],
                    f1[[k, j, i]].bz - emf.e2_cc[[k, j, i]],
                );
                emf.e2[[k, j, i]] = 0.25
                    * (f1[[k, j, i]].bz + f1[[k - 1, j, i]].bz
                        - f3[[k, j, i]].by
                        - f3[[k, j, i - 1]].by
                        + de2_l1
                        + de2_r1
                        + de2_l3
                        + de2_r3);
            }
        }
    }
}

/// 沿 x3 边的角点电动势
///
/// x1 通量的 by 是 -E3，x2 通量的 bz 是 +E3。
pub(crate) fn corner_emf3(
    emf: &mut EmfBuffers,
    f1: &Array3<Cons1D>,
    f2: &Array3<Cons1D>,
    b: &Bounds,
) {
    let (il, iu) = (b.full[0].lo, b.full[0].hi);
    let (jl, ju) = (b.full[1].lo, b.full[1].hi);
    let (kl, ku) = (b.full[2].lo, b.full[2].hi);
    for k in (kl + 1)..=(ku - 1) {
        for j in (jl + 1)..=ju {
            for i in (il + 1)..=iu {
                let de3_l2 = upwind(
                    f1[[k, j - 1, i]].d,
                    f2[[k, j, i - 1]].bz - emf.e3_cc[[k, j - 1, i - 1]],
                    f2[[k, j, i]].bz - emf.e3_cc[[k, j - 1, i]],
                );
                let de3_r2 = upwind(
                    f1[[k, j, i]].d,
                    f2[[k, j, i - 1]].bz - emf.e3_cc[[k, j, i - 1]],
                    f2[[k, j, i]].bz - emf.e3_cc[[k, j, i]],
                );
                let de3_l1 = upwind(
                    f2[[k, j, i - 1]].d,
                    -f1[[k, j - 1, i]].by - emf.e3_cc[[k, j - 1, i - 1]],
                    -f1[[k, j, i]].by - emf.e3_cc[[k, j, i - 1]],
                );
                let de3_r1 = upwind(
                    f2[[k, j, i]].d,
                    -f1[[k, j - 1, i]].by - emf.e3_cc[[k, j - 1, i]],
                    -f1[[k, j, i]].by - emf.e3_cc[[k, j, i]],
                );
                emf.e3[[k, j, i]] = 0.25
                    * (f2[[k, j, i - 1]].bz + f2[[k, j, i]].bz
                        - f1[[k, j - 1, i]].by
                        - f1[[k, j, i]].by
                        + de3_l1
                        + de3_r1
                        + de3_l2
                        + de3_r2);
            }
        }
    }
}

/// 面磁场的 CT 更新
///
/// `q = [dt/dx1, dt/dx2, dt/dx3]`（半步传入一半）。主体覆盖
/// `span` 内缩一层的箱体，随后补齐每个方向的最高面。
pub(crate) fn ct_update(bf: &mut FaceField, emf: &EmfBuffers, q: [Real; 3], span: &[IndexRange; 3]) {
    let (il, iu) = (span[0].lo, span[0].hi);
    let (jl, ju) = (span[1].lo, span[1].hi);
    let (kl, ku) = (span[2].lo, span[2].hi);
    for k in (kl + 1)..=(ku - 1) {
        for j in (jl + 1)..=(ju - 1) {
            for i in (il + 1)..=(iu - 1) {
                bf.b1[[k, j, i]] += q[2] * (emf.e2[[k + 1, j, i]] - emf.e2[[k, j, i]])
                    - q[1] * (emf.e3[[k, j + 1, i]] - emf.e3[[k, j, i]]);
                bf.b2[[k, j, i]] += q[0] * (emf.e3[[k, j, i + 1]] - emf.e3[[k, j, i]])
                    - q[2] * (emf.e1[[k + 1, j, i]] - emf.e1[[k, j, i]]);
                bf.b3[[k, j, i]] += q[1] * (emf.e1[[k, j + 1, i]] - emf.e1[[k, j, i]])
                    - q[0] * (emf.e2[[k, j, i + 1]] - emf.e2[[k, j, i]]);
            }
            bf.b1[[k, j, iu]] += q[2] * (emf.e2[[k + 1, j, iu]] - emf.e2[[k, j, iu]])
                - q[1] * (emf.e3[[k, j + 1, iu]] - emf.e3[[k, j, iu]]);
        }
        for i in (il + 1)..=(iu - 1) {
            bf.b2[[k, ju, i]] += q[0] * (emf.e3[[k, ju, i + 1]] - emf.e3[[k, ju, i]])
                - q[2] * (emf.e1[[k + 1, ju, i]] - emf.e1[[k, ju, i]]);
        }
    }
    for j in (jl + 1)..=(ju - 1) {
        for i in (il + 1)..=(iu - 1) {
            bf.b3[[ku, j, i]] += q[1] * (emf.e1[[ku, j + 1, i]] - emf.e1[[ku, j, i]])
                - q[0] * (emf.e2[[ku, j, i + 1]] - emf.e2[[ku, j, i]]);
        }
    }
}

/// 单元中心磁场取两侧更新后面值的平均
pub(crate) fn average_bcc(u: &mut ConservedField, bf: &FaceField, r: &[IndexRange; 3]) {
    let Some(bc) = u.bc.as_mut() else {
        return;
    };
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                bc[0][[k, j, i]] = 0.5 * (bf.b1[[k, j, i]] + bf.b1[[k, j, i + 1]]);
                bc[1][[k, j, i]] = 0.5 * (bf.b2[[k, j, i]] + bf.b2[[k, j + 1, i]]);
                bc[2][[k, j, i]] = 0.5 * (bf.b3[[k, j, i]] + bf.b3[[k + 1, j, i]]);
            }
        }
    }
}
