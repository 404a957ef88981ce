// crates/am_physics/tests/hcorrection.rs

//! 多维耗散退化验证
//!
//! 光滑无激波流动上（此处取均匀平移流），每面耗散下限退化为
//! 不触发额外耗散的值：开关 H 修正得到逐位相同的结果。

mod common;

use am_grid::FieldConfig;
use am_physics::prelude::*;
use common::*;

fn advance_uniform(h_correction: bool, steps: usize) -> am_grid::MeshBlock {
    let cfg = FieldConfig::adiabatic_mhd();
    // 含负向速度分量, 信号界两侧都被检验
    let mut blk = uniform_block(
        cfg,
        [8, 4, 4],
        1.0,
        [-0.3, 0.2, 0.1],
        1.0,
        [0.4, 0.3, 0.2],
    );
    let integ = integrator(cfg, h_correction);
    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, h_correction, std::slice::from_ref(&blk)).unwrap();
    for _ in 0..steps {
        periodic(&mut blk);
        integ.advance(&mut blk, &mut ws, 0.02).unwrap();
    }
    blk
}

#[test]
fn test_hcorr_identical_on_uniform_flow() {
    let on = advance_uniform(true, 2);
    let off = advance_uniform(false, 2);

    let (ir, jr, kr) = (on.interior(0), on.interior(1), on.interior(2));
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                assert_eq!(on.u.d[c], off.u.d[c]);
                assert_eq!(on.u.m1[c], off.u.m1[c]);
                assert_eq!(on.u.m2[c], off.u.m2[c]);
                assert_eq!(on.u.m3[c], off.u.m3[c]);
                assert_eq!(on.u.e.as_ref().unwrap()[c], off.u.e.as_ref().unwrap()[c]);
                let bon = on.bface.as_ref().unwrap();
                let boff = off.bface.as_ref().unwrap();
                assert_eq!(bon.b1[c], boff.b1[c]);
                assert_eq!(bon.b2[c], boff.b2[c]);
                assert_eq!(bon.b3[c], boff.b3[c]);
            }
        }
    }
}

#[test]
fn test_uniform_translation_is_fixed_point() {
    // 均匀平移流本身是不动点, H 修正不得破坏它
    let cfg = FieldConfig::adiabatic_mhd();
    let before = uniform_block(
        cfg,
        [8, 4, 4],
        1.0,
        [-0.3, 0.2, 0.1],
        1.0,
        [0.4, 0.3, 0.2],
    );
    let after = advance_uniform(true, 1);

    let (ir, jr, kr) = (after.interior(0), after.interior(1), after.interior(2));
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let c = [k, j, i];
                assert_eq!(after.u.d[c], before.u.d[c]);
                assert_eq!(after.u.m1[c], before.u.m1[c]);
                assert_eq!(
                    after.u.e.as_ref().unwrap()[c],
                    before.u.e.as_ref().unwrap()[c]
                );
            }
        }
    }
}
