// crates/am_physics/tests/common/mod.rs

//! 集成测试公共构造器
//!
//! 提供均匀块、沿 x 扰动的周期块与守恒量求和等辅助函数。

#![allow(dead_code)]

use am_foundation::Real;
use am_grid::{apply_boundary, BoundaryKind, FieldConfig, MeshBlock};
use am_physics::prelude::*;
use glam::DVec3;
use std::f64::consts::TAU;

/// 测试统一使用的绝热指数
pub const GAMMA: Real = 5.0 / 3.0;

/// 绝热状态方程
pub fn eos() -> EquationOfState {
    EquationOfState::Adiabatic { gamma: GAMMA }
}

/// HLLE + 分片线性的标准积分器
pub fn integrator(field_cfg: FieldConfig, h_correction: bool) -> VlIntegrator3d {
    VlIntegrator3d::new(
        field_cfg,
        eos(),
        IntegratorConfig {
            h_correction,
            self_gravity: None,
        },
        Box::new(Hlle::new(eos())),
        Box::new(PiecewiseLinear::new()),
    )
    .unwrap()
}

/// 全轴周期填充
pub fn periodic(blk: &mut MeshBlock) {
    apply_boundary(blk, [BoundaryKind::Periodic; 3]);
}

/// 全箱体（含 ghost）均匀初始化的块
///
/// 面磁场与单元中心磁场取同一常量，散度恰为零。
pub fn uniform_block(
    cfg: FieldConfig,
    nx: [usize; 3],
    d: Real,
    v: [Real; 3],
    p: Real,
    b: [Real; 3],
) -> MeshBlock {
    let dx = 1.0 / nx[0] as Real;
    let mut blk = MeshBlock::new(cfg, nx, 4, [dx; 3], DVec3::ZERO).unwrap();
    let ke = 0.5 * d * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
    let me = 0.5 * (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]);
    blk.u.d.fill(d);
    blk.u.m1.fill(d * v[0]);
    blk.u.m2.fill(d * v[1]);
    blk.u.m3.fill(d * v[2]);
    if let Some(e) = blk.u.e.as_mut() {
        e.fill(p / (GAMMA - 1.0) + ke + if cfg.mhd { me } else { 0.0 });
    }
    if let Some(bc) = blk.u.bc.as_mut() {
        for a in 0..3 {
            bc[a].fill(b[a]);
        }
    }
    for s in blk.u.s.iter_mut() {
        s.fill(0.4 * d);
    }
    if let Some(bf) = blk.bface.as_mut() {
        bf.b1.fill(b[0]);
        bf.b2.fill(b[1]);
        bf.b3.fill(b[2]);
    }
    blk
}

/// 沿 x 扰动的周期磁流体块（带一个被动标量）
///
/// 密度、速度、压强、切向磁场都是 x 的光滑周期函数，法向面磁场
/// 取常数，初始离散散度恰为零。域长为 1。
pub fn perturbed_block(nx: [usize; 3]) -> MeshBlock {
    let cfg = FieldConfig {
        mhd: true,
        adiabatic: true,
        n_scalars: 1,
    };
    let dx = 1.0 / nx[0] as Real;
    let mut blk = MeshBlock::new(cfg, nx, 4, [dx; 3], DVec3::ZERO).unwrap();
    let dims = blk.dims();
    let b1: Real = 0.3;

    for k in 0..dims[0] {
        for j in 0..dims[1] {
            for i in 0..dims[2] {
                let c = [k, j, i];
                let x = blk.cell_center(i, j, k).x;
                let d = 1.0 + 0.2 * (TAU * x).sin();
                let v1 = 0.10 * (TAU * x).sin();
                let v2 = 0.05 * (TAU * x).cos();
                let v3 = 0.02 * (TAU * x).sin();
                let p = 1.0 + 0.1 * (TAU * x).cos();
                let b2 = 0.2 + 0.1 * (TAU * x).sin();
                let b3 = 0.1 + 0.05 * (TAU * x).cos();

                blk.u.d[c] = d;
                blk.u.m1[c] = d * v1;
                blk.u.m2[c] = d * v2;
                blk.u.m3[c] = d * v3;
                blk.u.s[0][c] = 0.4 * d;
                if let Some(bf) = blk.bface.as_mut() {
                    bf.b1[c] = b1;
                    bf.b2[c] = b2;
                    bf.b3[c] = b3;
                }
                if let Some(bc) = blk.u.bc.as_mut() {
                    bc[0][c] = b1;
                    bc[1][c] = b2;
                    bc[2][c] = b3;
                }
                let ke = 0.5 * d * (v1 * v1 + v2 * v2 + v3 * v3);
                let me = 0.5 * (b1 * b1 + b2 * b2 + b3 * b3);
                if let Some(e) = blk.u.e.as_mut() {
                    e[c] = p / (GAMMA - 1.0) + ke + me;
                }
            }
        }
    }
    blk
}

/// 内部区守恒量总和: [质量, m1, m2, m3, 能量, 标量]
pub fn sums(blk: &MeshBlock) -> [Real; 6] {
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    let mut out = [0.0; 6];
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                out[0] += blk.u.d[c];
                out[1] += blk.u.m1[c];
                out[2] += blk.u.m2[c];
                out[3] += blk.u.m3[c];
                if let Some(e) = blk.u.e.as_ref() {
                    out[4] += e[c];
                }
                if let Some(s) = blk.u.s.first() {
                    out[5] += s[c];
                }
            }
        }
    }
    out
}

/// 内部区面磁场离散散度的最大绝对值
pub fn divb_max(blk: &MeshBlock) -> Real {
    let bf = blk.bface.as_ref().expect("需要磁流体块");
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    let mut out: Real = 0.0;
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let div = (bf.b1[[k, j, i + 1]] - bf.b1[[k, j, i]]) / blk.dx[0]
                    + (bf.b2[[k, j + 1, i]] - bf.b2[[k, j, i]]) / blk.dx[1]
                    + (bf.b3[[k + 1, j, i]] - bf.b3[[k, j, i]]) / blk.dx[2];
                out = out.max(div.abs());
            }
        }
    }
    out
}

/// 相对比较（参考值接近零时退化为绝对比较）
pub fn assert_close(a: Real, b: Real, tol: Real, what: &str) {
    let scale = 1.0 + a.abs().max(b.abs());
    assert!(
        (a - b).abs() <= tol * scale,
        "{}: {} vs {} (容差 {})",
        what,
        a,
        b,
        tol
    );
}
