// crates/am_physics/tests/gravity.rs

//! 引力源项耦合验证
//!
//! 均匀静止态加线性势（均匀重力场）有精确解:
//! 一步后 m1 = -ρ g dt, 能量增量 0.5 ρ g² dt², 密度不变。
//! 自引力以张量形式更新动量, 均匀场的张量散度为零, 只剩
//! 平均密度背景项。

mod common;

use am_foundation::Real;
use am_grid::FieldConfig;
use am_physics::gravity::SelfGravityParams;
use am_physics::prelude::*;
use common::*;
use glam::DVec3;
use std::sync::Arc;

const G_ACC: Real = 0.3;

fn linear_potential() -> Arc<dyn StaticPotential> {
    Arc::new(LinearPotential {
        grad: DVec3::new(G_ACC, 0.0, 0.0),
    })
}

#[test]
fn test_static_uniform_gravity_kick() {
    let cfg = FieldConfig::adiabatic_hydro();
    let (d, p) = (1.5, 1.0);
    let mut blk = uniform_block(cfg, [8, 4, 4], d, [0.0; 3], p, [0.0; 3]);
    let e0 = p / (GAMMA - 1.0);

    let integ = VlIntegrator3d::new(
        cfg,
        eos(),
        IntegratorConfig::default(),
        Box::new(Hlle::new(eos())),
        Box::new(PiecewiseLinear::new()),
    )
    .unwrap()
    .with_static_potential(linear_potential());

    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    let dt = 0.01;
    integ.advance(&mut blk, &mut ws, dt).unwrap();

    let m1_expect = -d * G_ACC * dt;
    let e_expect = e0 + 0.5 * d * G_ACC * G_ACC * dt * dt;
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                assert_close(blk.u.d[c], d, 1e-13, "密度");
                assert_close(blk.u.m1[c], m1_expect, 1e-12, "m1 动量");
                assert_close(blk.u.m2[c], 0.0, 1e-12, "m2 动量");
                assert_close(blk.u.m3[c], 0.0, 1e-12, "m3 动量");
                assert_close(blk.u.e.as_ref().unwrap()[c], e_expect, 1e-12, "能量");
            }
        }
    }
}

#[test]
fn test_self_gravity_linear_potential() {
    let cfg = FieldConfig::adiabatic_hydro();
    let (d, p) = (1.0, 1.0);
    let mut blk = uniform_block(cfg, [8, 4, 4], d, [0.0; 3], p, [0.0; 3])
        .with_self_gravity()
        .unwrap();
    let e0 = p / (GAMMA - 1.0);

    // 势场在含 ghost 的整个箱体上取线性采样
    let dims = blk.dims();
    for k in 0..dims[0] {
        for j in 0..dims[1] {
            for i in 0..dims[2] {
                let x = blk.cell_center(i, j, k).x;
                blk.phi.as_mut().unwrap()[[k, j, i]] = G_ACC * x;
            }
        }
    }

    let integ = VlIntegrator3d::new(
        cfg,
        eos(),
        IntegratorConfig {
            h_correction: false,
            self_gravity: Some(SelfGravityParams {
                four_pi_g: 1.0,
                mean_rho: d,
            }),
        },
        Box::new(Hlle::new(eos())),
        Box::new(PiecewiseLinear::new()),
    )
    .unwrap();

    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    let dt = 0.01;
    integ.advance(&mut blk, &mut ws, dt).unwrap();

    // 均匀场张量散度为零, 动量来自平均密度背景项
    let m1_expect = -d * G_ACC * dt;
    let e_expect = e0 + 0.5 * d * G_ACC * G_ACC * dt * dt;
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                assert_close(blk.u.d[c], d, 1e-13, "密度");
                assert_close(blk.u.m1[c], m1_expect, 1e-12, "m1 动量");
                assert_close(blk.u.e.as_ref().unwrap()[c], e_expect, 1e-12, "能量");
            }
        }
    }

    // 校正步质量通量被快照, 等于半步动量
    let mf = blk.mass_flux.as_ref().unwrap();
    let v_half = -0.5 * G_ACC * dt;
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                assert_close(mf[0][[k, j, i]], d * v_half, 1e-12, "x1 质量通量快照");
            }
        }
    }
}
