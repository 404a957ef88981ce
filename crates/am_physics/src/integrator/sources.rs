// crates/am_physics/src/integrator/sources.rs

//! 引力源项
//!
//! 动量源取势差与密度的乘积，能量源取质量通量加权的面势差，
//! 与流体静力学更新同阶守恒:
//!
//! ```text
//! S_M = -ρ ∇φ        S_E = -(ρv) · ∇φ
//! ```
//!
//! 预报步用时间步起点的密度与一阶通量推进半步；校正步用半步
//! 密度与全通量推进全步。自引力除梯度力外还携带由引力场分量
//! 构成的各向异性动量通量张量项，以及平均密度背景项。
//!
//! 两个阶段的作用范围都与对应的守恒更新范围一致（各比更新箱体
//! 多出的 ghost 层由提交范围决定），保证源项与其修正的通量散度
//! 逐单元对齐。

use crate::gravity::{SelfGravityParams, StaticPotential};
use crate::state::Cons1D;
use am_foundation::{Array3, IndexRange, Real};
use am_grid::ConservedField;
use glam::DVec3;

/// 块几何信息（拷贝自网格块，避免与场的可变借用冲突）
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockGeom {
    /// 各方向格距
    pub dx: [Real; 3],
    /// 内部区下角点物理坐标
    pub origin: DVec3,
    /// ghost 层数
    pub nghost: usize,
}

impl BlockGeom {
    /// 单元中心物理坐标
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        let ng = self.nghost as Real;
        DVec3::new(
            self.origin.x + (i as Real - ng + 0.5) * self.dx[0],
            self.origin.y + (j as Real - ng + 0.5) * self.dx[1],
            self.origin.z + (k as Real - ng + 0.5) * self.dx[2],
        )
    }
}

/// 静态引力势源项
///
/// `rho` 为动量源使用的密度场（预报步传时间步起点密度，校正步
/// 传半步密度），`q` 为该阶段的 dt/dx 系数。
pub(crate) fn apply_static_gravity(
    target: &mut ConservedField,
    rho: &Array3<Real>,
    flux: &[Array3<Cons1D>; 3],
    geom: &BlockGeom,
    pot: &dyn StaticPotential,
    q: [Real; 3],
    r: &[IndexRange; 3],
) {
    let half_dx = DVec3::new(0.5 * geom.dx[0], 0.5 * geom.dx[1], 0.5 * geom.dx[2]);
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let pos = geom.cell_center(i, j, k);
                let phic = pot.phi(pos);

                let phir = pot.phi(DVec3::new(pos.x + half_dx.x, pos.y, pos.z));
                let phil = pot.phi(DVec3::new(pos.x - half_dx.x, pos.y, pos.z));
                target.m1[c] -= q[0] * (phir - phil) * rho[c];
                if let Some(e) = target.e.as_mut() {
                    e[c] -= q[0]
                        * (flux[0][c].d * (phic - phil) + flux[0][[k, j, i + 1]].d * (phir - phic));
                }

                let phir = pot.phi(DVec3::new(pos.x, pos.y + half_dx.y, pos.z));
                let phil = pot.phi(DVec3::new(pos.x, pos.y - half_dx.y, pos.z));
                target.m2[c] -= q[1] * (phir - phil) * rho[c];
                if let Some(e) = target.e.as_mut() {
                    e[c] -= q[1]
                        * (flux[1][c].d * (phic - phil) + flux[1][[k, j + 1, i]].d * (phir - phic));
                }

                let phir = pot.phi(DVec3::new(pos.x, pos.y, pos.z + half_dx.z));
                let phil = pot.phi(DVec3::new(pos.x, pos.y, pos.z - half_dx.z));
                target.m3[c] -= q[2] * (phir - phil) * rho[c];
                if let Some(e) = target.e.as_mut() {
                    e[c] -= q[2]
                        * (flux[2][c].d * (phic - phil) + flux[2][[k + 1, j, i]].d * (phir - phic));
                }
            }
        }
    }
}

/// 自引力势的半步源项
///
/// 面势取相邻单元中心势的平均，其余与静态势同构。
pub(crate) fn apply_self_gravity_half(
    uhalf: &mut ConservedField,
    rho: &Array3<Real>,
    phi: &Array3<Real>,
    flux: &[Array3<Cons1D>; 3],
    q: [Real; 3],
    r: &[IndexRange; 3],
) {
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let phic = phi[c];

                let phir = 0.5 * (phi[c] + phi[[k, j, i + 1]]);
                let phil = 0.5 * (phi[c] + phi[[k, j, i - 1]]);
                uhalf.m1[c] -= q[0] * (phir - phil) * rho[c];
                if let Some(e) = uhalf.e.as_mut() {
                    e[c] -= q[0]
                        * (flux[0][c].d * (phic - phil) + flux[0][[k, j, i + 1]].d * (phir - phic));
                }

                let phir = 0.5 * (phi[c] + phi[[k, j + 1, i]]);
                let phil = 0.5 * (phi[c] + phi[[k, j - 1, i]]);
                uhalf.m2[c] -= q[1] * (phir - phil) * rho[c];
                if let Some(e) = uhalf.e.as_mut() {
                    e[c] -= q[1]
                        * (flux[1][c].d * (phic - phil) + flux[1][[k, j + 1, i]].d * (phir - phic));
                }

                let phir = 0.5 * (phi[c] + phi[[k + 1, j, i]]);
                let phil = 0.5 * (phi[c] + phi[[k - 1, j, i]]);
                uhalf.m3[c] -= q[2] * (phir - phil) * rho[c];
                if let Some(e) = uhalf.e.as_mut() {
                    e[c] -= q[2]
                        * (flux[2][c].d * (phic - phil) + flux[2][[k + 1, j, i]].d * (phir - phic));
                }
            }
        }
    }
}

/// 自引力势的全步源项
///
/// 动量按引力场张量通量差更新，能量按质量通量加权势差更新。
/// 外部主循环还需用新势做一次通量修正才能把源项提到二阶。
pub(crate) fn apply_self_gravity_full(
    u: &mut ConservedField,
    phi: &Array3<Real>,
    flux: &[Array3<Cons1D>; 3],
    params: &SelfGravityParams,
    q: [Real; 3],
    dx: [Real; 3],
    r: &[IndexRange; 3],
) {
    let ig = 1.0 / params.four_pi_g;

    // d/dx1 项
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let phic = phi[c];
                let phil = 0.5 * (phi[[k, j, i - 1]] + phi[c]);
                let phir = 0.5 * (phi[c] + phi[[k, j, i + 1]]);

                // 左右 x1 面上的引力场分量
                let gxl = (phi[[k, j, i - 1]] - phi[c]) / dx[0];
                let gxr = (phi[c] - phi[[k, j, i + 1]]) / dx[0];
                let gyl = 0.25
                    * ((phi[[k, j - 1, i - 1]] - phi[[k, j + 1, i - 1]])
                        + (phi[[k, j - 1, i]] - phi[[k, j + 1, i]]))
                    / dx[1];
                let gyr = 0.25
                    * ((phi[[k, j - 1, i]] - phi[[k, j + 1, i]])
                        + (phi[[k, j - 1, i + 1]] - phi[[k, j + 1, i + 1]]))
                    / dx[1];
                let gzl = 0.25
                    * ((phi[[k - 1, j, i - 1]] - phi[[k + 1, j, i - 1]])
                        + (phi[[k - 1, j, i]] - phi[[k + 1, j, i]]))
                    / dx[2];
                let gzr = 0.25
                    * ((phi[[k - 1, j, i]] - phi[[k + 1, j, i]])
                        + (phi[[k - 1, j, i + 1]] - phi[[k + 1, j, i + 1]]))
                    / dx[2];

                let flx_m1l = 0.5 * (gxl * gxl - gyl * gyl - gzl * gzl) * ig + params.mean_rho * phil;
                let flx_m1r = 0.5 * (gxr * gxr - gyr * gyr - gzr * gzr) * ig + params.mean_rho * phir;
                let flx_m2l = gxl * gyl * ig;
                let flx_m2r = gxr * gyr * ig;
                let flx_m3l = gxl * gzl * ig;
                let flx_m3r = gxr * gzr * ig;

                u.m1[c] -= q[0] * (flx_m1r - flx_m1l);
                u.m2[c] -= q[0] * (flx_m2r - flx_m2l);
                u.m3[c] -= q[0] * (flx_m3r - flx_m3l);
                if let Some(e) = u.e.as_mut() {
                    e[c] -= q[0]
                        * (flux[0][c].d * (phic - phil) + flux[0][[k, j, i + 1]].d * (phir - phic));
                }
            }
        }
    }

    // d/dx2 项
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let phic = phi[c];
                let phil = 0.5 * (phi[[k, j - 1, i]] + phi[c]);
                let phir = 0.5 * (phi[c] + phi[[k, j + 1, i]]);

                let gxl = 0.25
                    * ((phi[[k, j - 1, i - 1]] - phi[[k, j - 1, i + 1]])
                        + (phi[[k, j, i - 1]] - phi[[k, j, i + 1]]))
                    / dx[0];
                let gxr = 0.25
                    * ((phi[[k, j, i - 1]] - phi[[k, j, i + 1]])
                        + (phi[[k, j + 1, i - 1]] - phi[[k, j + 1, i + 1]]))
                    / dx[0];
                let gyl = (phi[[k, j - 1, i]] - phi[c]) / dx[1];
                let gyr = (phi[c] - phi[[k, j + 1, i]]) / dx[1];
                let gzl = 0.25
                    * ((phi[[k - 1, j - 1, i]] - phi[[k + 1, j - 1, i]])
                        + (phi[[k - 1, j, i]] - phi[[k + 1, j, i]]))
                    / dx[2];
                let gzr = 0.25
                    * ((phi[[k - 1, j, i]] - phi[[k + 1, j, i]])
                        + (phi[[k - 1, j + 1, i]] - phi[[k + 1, j + 1, i]]))
                    / dx[2];

                let flx_m1l = gyl * gxl * ig;
                let flx_m1r = gyr * gxr * ig;
                let flx_m2l = 0.5 * (gyl * gyl - gxl * gxl - gzl * gzl) * ig + params.mean_rho * phil;
                let flx_m2r = 0.5 * (gyr * gyr - gxr * gxr - gzr * gzr) * ig + params.mean_rho * phir;
                let flx_m3l = gyl * gzl * ig;
                let flx_m3r = gyr * gzr * ig;

                u.m1[c] -= q[1] * (flx_m1r - flx_m1l);
                u.m2[c] -= q[1] * (flx_m2r - flx_m2l);
                u.m3[c] -= q[1] * (flx_m3r - flx_m3l);
                if let Some(e) = u.e.as_mut() {
                    e[c] -= q[1]
                        * (flux[1][c].d * (phic - phil) + flux[1][[k, j + 1, i]].d * (phir - phic));
                }
            }
        }
    }

    // d/dx3 项
    for k in r[2].range() {
        for j in r[1].range() {
            for i in r[0].range() {
                let c = [k, j, i];
                let phic = phi[c];
                let phil = 0.5 * (phi[[k - 1, j, i]] + phi[c]);
                let phir = 0.5 * (phi[c] + phi[[k + 1, j, i]]);

                let gxl = 0.25
                    * ((phi[[k - 1, j, i - 1]] - phi[[k - 1, j, i + 1]])
                        + (phi[[k, j, i - 1]] - phi[[k, j, i + 1]]))
                    / dx[0];
                let gxr = 0.25
                    * ((phi[[k, j, i - 1]] - phi[[k, j, i + 1]])
                        + (phi[[k + 1, j, i - 1]] - phi[[k + 1, j, i + 1]]))
                    / dx[0];
                let gyl = 0.25
                    * ((phi[[k - 1, j - 1, i]] - phi[[k - 1, j + 1, i]])
                        + (phi[[k, j - 1, i]] - phi[[k, j + 1, i]]))
                    / dx[1];
                let gyr = 0.25
                    * ((phi[[k, j - 1, i]] - phi[[k, j + 1, i]])
                        + (phi[[k + 1, j - 1, i]] - phi[[k + 1, j + 1, i]]))
                    / dx[1];
                let gzl = (phi[[k - 1, j, i]] - phi[c]) / dx[2];
                let gzr = (phi[c] - phi[[k + 1, j, i]]) / dx[2];

                let flx_m1l = gzl * gxl * ig;
                let flx_m1r = gzr * gxr * ig;
                let flx_m2l = gzl * gyl * ig;
                let flx_m2r = gzr * gyr * ig;
                let flx_m3l = 0.5 * (gzl * gzl - gxl * gxl - gyl * gyl) * ig + params.mean_rho * phil;
                let flx_m3r = 0.5 * (gzr * gzr - gxr * gxr - gyr * gyr) * ig + params.mean_rho * phir;

                u.m1[c] -= q[2] * (flx_m1r - flx_m1l);
                u.m2[c] -= q[2] * (flx_m2r - flx_m2l);
                u.m3[c] -= q[2] * (flx_m3r - flx_m3l);
                if let Some(e) = u.e.as_mut() {
                    e[c] -= q[2]
                        * (flux[2][c].d * (phic - phil) + flux[2][[k + 1, j, i]].d * (phir - phic));
                }
            }
        }
    }
}

/// 保存校正步质量通量供外部自引力通量修正使用
pub(crate) fn save_mass_fluxes(
    mf: &mut [Array3<Real>; 3],
    flux: &[Array3<Cons1D>; 3],
    interior: &[IndexRange; 3],
) {
    for k in interior[2].lo..=(interior[2].hi + 1) {
        for j in interior[1].lo..=(interior[1].hi + 1) {
            for i in interior[0].lo..=(interior[0].hi + 1) {
                let c = [k, j, i];
                mf[0][c] = flux[0][c].d;
                mf[1][c] = flux[1][c].d;
                mf[2][c] = flux[2][c].d;
            }
        }
    }
}
