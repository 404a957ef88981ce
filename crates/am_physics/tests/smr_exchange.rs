// crates/am_physics/tests/smr_exchange.rs

//! 细化边界寄存器验证
//!
//! - 只有携带链接的面在校正步后被写入，寄存器存全局方位的动量
//!   通量
//! - 磁流体链接额外携带两族包络边电动势，形状比单元补片各多一排

mod common;

use am_foundation::IndexRange;
use am_grid::{BlockFace, FieldConfig, LinkKind, SmrLink};
use am_physics::prelude::*;
use common::*;

#[test]
fn test_registers_hold_global_momentum_fluxes() {
    let cfg = FieldConfig::adiabatic_hydro();
    let (d, v, p) = (1.0, [1.0, 2.0, 3.0], 1.0);
    let mut blk = uniform_block(cfg, [8, 8, 8], d, v, p, [0.0; 3]);

    // x1 负向面的子块链接与 x2 正向面的父块链接
    let w1 = [
        IndexRange::new(4, 4),
        IndexRange::new(5, 8),
        IndexRange::new(6, 7),
    ];
    blk.add_link(SmrLink::new(&cfg, LinkKind::Child, BlockFace::X1Lo, 7, w1).unwrap());
    let w2 = [
        IndexRange::new(4, 9),
        IndexRange::new(6, 9),
        IndexRange::new(4, 7),
    ];
    blk.add_link(SmrLink::new(&cfg, LinkKind::Parent, BlockFace::X2Hi, 3, w2).unwrap());
    assert_eq!(blk.links.len(), 2);

    let integ = integrator(cfg, false);
    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    periodic(&mut blk);
    integ.advance(&mut blk, &mut ws, 0.005).unwrap();

    let energy = p / (GAMMA - 1.0) + 0.5 * d * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);

    // x1 面: 质量通量 ρv1, 动量通量按全局方位
    let reg = &blk.links[0].reg;
    assert_eq!(reg.patch_dims(), [2, 4]);
    for hh in 0..2 {
        for ll in 0..4 {
            let pi = [hh, ll];
            assert_close(reg.d[pi], d * v[0], 1e-11, "x1 质量通量");
            assert_close(reg.m1[pi], d * v[0] * v[0] + p, 1e-11, "x1 m1 通量");
            assert_close(reg.m2[pi], d * v[0] * v[1], 1e-11, "x1 m2 通量");
            assert_close(reg.m3[pi], d * v[0] * v[2], 1e-11, "x1 m3 通量");
            assert_close(
                reg.e.as_ref().unwrap()[pi],
                (energy + p) * v[0],
                1e-11,
                "x1 能量通量",
            );
        }
    }

    // x2 面: 质量通量 ρv2, 置换已还原
    let reg = &blk.links[1].reg;
    assert_eq!(reg.patch_dims(), [4, 6]);
    for hh in 0..4 {
        for ll in 0..6 {
            let pi = [hh, ll];
            assert_close(reg.d[pi], d * v[1], 1e-11, "x2 质量通量");
            assert_close(reg.m1[pi], d * v[1] * v[0], 1e-11, "x2 m1 通量");
            assert_close(reg.m2[pi], d * v[1] * v[1] + p, 1e-11, "x2 m2 通量");
            assert_close(reg.m3[pi], d * v[1] * v[2], 1e-11, "x2 m3 通量");
            assert_close(
                reg.e.as_ref().unwrap()[pi],
                (energy + p) * v[1],
                1e-11,
                "x2 能量通量",
            );
        }
    }
}

#[test]
fn test_unlinked_registers_stay_untouched() {
    let cfg = FieldConfig::adiabatic_hydro();
    let mut blk = uniform_block(cfg, [8, 8, 8], 1.0, [1.0, 0.0, 0.0], 1.0, [0.0; 3]);
    let w = [
        IndexRange::new(4, 4),
        IndexRange::new(4, 11),
        IndexRange::new(4, 11),
    ];
    blk.add_link(SmrLink::new(&cfg, LinkKind::Child, BlockFace::X1Lo, 1, w).unwrap());

    let integ = integrator(cfg, false);
    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    periodic(&mut blk);
    integ.advance(&mut blk, &mut ws, 0.005).unwrap();

    // 携带链接的面被写入
    assert!(blk.links[0].reg.d.as_slice().iter().all(|x| x.abs() > 0.5));
    // 其余面没有链接, 自然没有可写的寄存器
    assert_eq!(blk.links.len(), 1);
}

#[test]
fn test_mhd_link_carries_edge_emfs() {
    let cfg = FieldConfig::adiabatic_mhd();
    let (d, v, b) = (1.0, [0.5, 0.3, 0.0], [0.2, 0.4, 0.1]);
    let mut blk = uniform_block(cfg, [8, 8, 8], d, v, 1.0, b);
    let w = [
        IndexRange::new(4, 4),
        IndexRange::new(4, 9),
        IndexRange::new(4, 11),
    ];
    blk.add_link(SmrLink::new(&cfg, LinkKind::Child, BlockFace::X1Lo, 2, w).unwrap());

    let integ = integrator(cfg, false);
    let mut ws =
        IntegratorWorkspace::for_blocks(cfg, false, std::slice::from_ref(&blk)).unwrap();
    periodic(&mut blk);
    integ.advance(&mut blk, &mut ws, 0.005).unwrap();

    let reg = &blk.links[0].reg;
    assert_eq!(reg.patch_dims(), [8, 6]);
    let emf = reg.emf.as_ref().unwrap();
    // 两族边电动势各在一个横向方向多一排
    assert_eq!(emf[0].dims(), [9, 6]);
    assert_eq!(emf[1].dims(), [8, 7]);

    // 均匀流的角点电动势退化为 -v×B 的对应分量
    let e2_expect = b[2] * v[0] - b[0] * v[2];
    let e3_expect = b[0] * v[1] - b[1] * v[0];
    for x in emf[0].as_slice() {
        assert_close(*x, e2_expect, 1e-11, "边电动势 e2");
    }
    for x in emf[1].as_slice() {
        assert_close(*x, e3_expect, 1e-11, "边电动势 e3");
    }

    // 切向磁场通量也随寄存器交换, 法向分量恒为零
    let bpatch = reg.b.as_ref().unwrap();
    for x in bpatch[0].as_slice() {
        assert_eq!(*x, 0.0);
    }
}
