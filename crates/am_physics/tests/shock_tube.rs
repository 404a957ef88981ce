// crates/am_physics/tests/shock_tube.rs

//! 1D 平面磁流体激波管
//!
//! γ = 2 的经典算例: 左态 (ρ, p, By) = (1.0, 1.0, +0.75),
//! 右态 (0.125, 0.1, -0.75), 法向磁场 Bx = 0.75 均匀, 初速为零。
//! 推进到 t = 0.08 后检验:
//!
//! - 波系尚未触及边界, 边界单元保持初值, 总质量守恒到舍入误差
//! - 密度处于物理包络内, 中心区域已明显演化
//! - 平面对称性保持: 解不随 y、z 变化
//! - 法向磁场被 CT 精确冻结在 0.75

mod common;

use am_foundation::Real;
use am_grid::{apply_boundary, BoundaryKind, FieldConfig, MeshBlock};
use am_physics::prelude::*;
use common::assert_close;
use glam::DVec3;

const GAMMA: Real = 2.0;
const BN: Real = 0.75;
const NX: usize = 64;

fn build_tube() -> MeshBlock {
    let cfg = FieldConfig::adiabatic_mhd();
    let dx = 1.0 / NX as Real;
    let mut blk = MeshBlock::new(
        cfg,
        [NX, 4, 4],
        4,
        [dx, dx, dx],
        DVec3::new(-0.5, 0.0, 0.0),
    )
    .unwrap();

    let dims = blk.dims();
    for k in 0..dims[0] {
        for j in 0..dims[1] {
            for i in 0..dims[2] {
                let c = [k, j, i];
                let x = blk.cell_center(i, j, k).x;
                let (d, p, bt) = if x < 0.0 {
                    (1.0, 1.0, 0.75)
                } else {
                    (0.125, 0.1, -0.75)
                };
                blk.u.d[c] = d;
                if let Some(bc) = blk.u.bc.as_mut() {
                    bc[0][c] = BN;
                    bc[1][c] = bt;
                }
                if let Some(e) = blk.u.e.as_mut() {
                    e[c] = p / (GAMMA - 1.0) + 0.5 * (BN * BN + bt * bt);
                }
                if let Some(bf) = blk.bface.as_mut() {
                    bf.b1[c] = BN;
                    bf.b2[c] = bt;
                }
            }
        }
    }
    blk
}

fn interior_mass(blk: &MeshBlock) -> Real {
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    let mut mass = 0.0;
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                mass += blk.u.d[[k, j, i]];
            }
        }
    }
    mass
}

#[test]
fn test_brio_wu_tube() {
    let cfg = FieldConfig::adiabatic_mhd();
    let eos = EquationOfState::Adiabatic { gamma: GAMMA };
    let integ = VlIntegrator3d::new(
        cfg,
        eos,
        IntegratorConfig::default(),
        Box::new(Hlle::new(eos)),
        Box::new(PiecewiseLinear::new()),
    )
    .unwrap();

    let mut blk = build_tube();
    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    let estimator = CflEstimator::new(0.3);
    let bc = [
        BoundaryKind::Outflow,
        BoundaryKind::Periodic,
        BoundaryKind::Periodic,
    ];

    let mass0 = interior_mass(&blk);
    let d_center0 = blk.u.d[[6, 6, 4 + NX / 2]];

    let tmax: Real = 0.08;
    let mut t: Real = 0.0;
    let mut steps = 0usize;
    while t < tmax {
        apply_boundary(&mut blk, bc);
        let dt = estimator.compute(&blk, &eos).min(tmax - t);
        integ.advance(&mut blk, &mut ws, dt).unwrap();
        t += dt;
        steps += 1;
        assert!(steps < 1000, "时间步意外过小");
    }

    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));

    // 密度包络与法向磁场冻结
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                let d = blk.u.d[c];
                assert!(d > 0.08 && d < 1.05, "密度 {} 越出物理包络", d);
                assert_close(
                    blk.bface.as_ref().unwrap().b1[c],
                    BN,
                    1e-12,
                    "法向面磁场",
                );
            }
        }
    }

    // 总质量守恒 (波未触边, 边界质量通量为零)
    assert_close(interior_mass(&blk), mass0, 1e-10, "总质量");

    // 边界单元尚未被波及
    assert_close(blk.u.d[[6, 6, ir.lo]], 1.0, 1e-10, "左边界密度");
    assert_close(blk.u.d[[6, 6, ir.hi]], 0.125, 1e-10, "右边界密度");

    // 中心区域已演化
    let d_center = blk.u.d[[6, 6, 4 + NX / 2]];
    assert!(
        (d_center - d_center0).abs() > 0.01,
        "中心密度未演化: {} -> {}",
        d_center0,
        d_center
    );

    // 平面对称性: 解不随 y、z 变化
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                let r = [kr.lo, jr.lo, i];
                assert_close(blk.u.d[c], blk.u.d[r], 1e-11, "y/z 平面对称性");
                assert_close(
                    blk.u.m1[c],
                    blk.u.m1[r],
                    1e-11,
                    "y/z 动量对称性",
                );
            }
        }
    }
}
