// apps/am_cli/src/commands/run.rs

//! run 子命令: 内置 1D 平面磁流体激波管
//!
//! 初始条件 (γ = 2):
//!
//! ```text
//! 左侧 (x < 0): ρ = 1.0,   p = 1.0, v = 0, 切向磁场 +0.75
//! 右侧 (x > 0): ρ = 0.125, p = 0.1, v = 0, 切向磁场 -0.75
//! 法向磁场 0.75 处处均匀
//! ```
//!
//! x 方向外流边界，横向周期边界。每步结束打印守恒量漂移与
//! 密度范围。

use am_foundation::Real;
use am_grid::{apply_boundary, BoundaryKind, FieldConfig, MeshBlock};
use am_physics::prelude::*;
use anyhow::{bail, Context};
use clap::Args;
use glam::DVec3;
use tracing::{info, warn};

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// x 方向内部格数
    #[arg(long, default_value_t = 128)]
    nx: usize,

    /// 推进的物理时长
    #[arg(long, default_value_t = 0.08)]
    tmax: Real,

    /// CFL 数
    #[arg(long, default_value_t = 0.3)]
    cfl: Real,

    /// 黎曼求解器 (hlle, rusanov)
    #[arg(long, default_value = "hlle")]
    solver: String,

    /// 空间重构阶数 (1, 2)
    #[arg(long, default_value_t = 2)]
    order: u8,

    /// 启用多维耗散 (H 修正)
    #[arg(long, default_value_t = false)]
    hcorr: bool,
}

/// 横向格数（周期填充要求不小于 ghost 层数）
const NT: usize = 4;
const NGHOST: usize = 4;
const GAMMA: Real = 2.0;

/// 执行 run 子命令
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    if args.nx < 2 * NGHOST {
        bail!("nx 至少为 {}", 2 * NGHOST);
    }
    if !(args.cfl > 0.0 && args.cfl < 1.0) {
        bail!("CFL 数必须在 (0, 1) 内");
    }

    let field_cfg = FieldConfig::adiabatic_mhd();
    let eos = EquationOfState::Adiabatic { gamma: GAMMA };
    let riemann: Box<dyn RiemannSolver> = match args.solver.as_str() {
        "hlle" => Box::new(Hlle::new(eos)),
        "rusanov" => Box::new(Rusanov::new(eos)),
        other => bail!("未知求解器: {}", other),
    };
    let recon: Box<dyn Reconstruction> = match args.order {
        1 => Box::new(PiecewiseConstant::new()),
        2 => Box::new(PiecewiseLinear::new()),
        other => bail!("不支持的重构阶数: {}", other),
    };

    let integ = VlIntegrator3d::new(
        field_cfg,
        eos,
        IntegratorConfig {
            h_correction: args.hcorr,
            self_gravity: None,
        },
        riemann,
        recon,
    )
    .context("积分器构造失败")?;

    let mut blk = build_shock_tube(field_cfg, args.nx).context("算例初始化失败")?;
    let mut ws = IntegratorWorkspace::for_blocks(field_cfg, args.hcorr, std::slice::from_ref(&blk))
        .context("工作区分配失败")?;
    let estimator = CflEstimator::new(args.cfl);
    let bc = [
        BoundaryKind::Outflow,
        BoundaryKind::Periodic,
        BoundaryKind::Periodic,
    ];

    let (mass0, energy0) = totals(&blk);
    info!(
        nx = args.nx,
        tmax = args.tmax,
        solver = args.solver.as_str(),
        order = args.order,
        hcorr = args.hcorr,
        "开始激波管推进"
    );

    let mut t: Real = 0.0;
    let mut step: u64 = 0;
    while t < args.tmax {
        apply_boundary(&mut blk, bc);
        let dt = estimator.compute(&blk, &eos).min(args.tmax - t);
        if let Err(e) = integ.advance(&mut blk, &mut ws, dt) {
            warn!(step, t, "推进失败: {}", e);
            return Err(e.into());
        }
        t += dt;
        step += 1;
        if step % 10 == 0 {
            let (mass, energy) = totals(&blk);
            let (dmin, dmax) = density_range(&blk);
            info!(
                step,
                t,
                dt,
                mass_drift = (mass - mass0) / mass0,
                energy_drift = (energy - energy0) / energy0,
                d_min = dmin,
                d_max = dmax,
                "推进中"
            );
        }
    }

    let (mass, energy) = totals(&blk);
    let (dmin, dmax) = density_range(&blk);
    info!(
        step,
        t,
        mass_drift = (mass - mass0) / mass0,
        energy_drift = (energy - energy0) / energy0,
        d_min = dmin,
        d_max = dmax,
        "激波管推进完成"
    );
    Ok(())
}

/// 构造激波管初始状态
fn build_shock_tube(cfg: FieldConfig, nx: usize) -> anyhow::Result<MeshBlock> {
    let dx = 1.0 / nx as Real;
    let mut blk = MeshBlock::new(
        cfg,
        [nx, NT, NT],
        NGHOST,
        [dx, dx, dx],
        DVec3::new(-0.5, 0.0, 0.0),
    )?;

    let bn: Real = 0.75;
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
                    bc[0][c] = bn;
                    bc[1][c] = bt;
                }
                if let Some(e) = blk.u.e.as_mut() {
                    e[c] = p / (GAMMA - 1.0) + 0.5 * (bn * bn + bt * bt);
                }
            }
        }
    }
    if let Some(bf) = blk.bface.as_mut() {
        bf.b1.fill(bn);
        // 切向面磁场与单元中心值一致 (沿 x 分片常数)
        for k in 0..dims[0] {
            for j in 0..dims[1] {
                for i in 0..dims[2] {
                    let x = blk.origin.x + (i as Real - NGHOST as Real + 0.5) * dx;
                    bf.b2[[k, j, i]] = if x < 0.0 { 0.75 } else { -0.75 };
                }
            }
        }
    }
    Ok(blk)
}

/// 内部区总质量与总能量
fn totals(blk: &MeshBlock) -> (Real, Real) {
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    let mut mass = 0.0;
    let mut energy = 0.0;
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                mass += blk.u.d[[k, j, i]];
                if let Some(e) = blk.u.e.as_ref() {
                    energy += e[[k, j, i]];
                }
            }
        }
    }
    (mass, energy)
}

/// 内部区密度范围
fn density_range(blk: &MeshBlock) -> (Real, Real) {
    let (ir, jr, kr) = (blk.interior(0), blk.interior(1), blk.interior(2));
    let mut dmin = Real::INFINITY;
    let mut dmax = Real::NEG_INFINITY;
    for k in kr.range() {
        for j in jr.range() {
            for i in ir.range() {
                let d = blk.u.d[[k, j, i]];
                dmin = dmin.min(d);
                dmax = dmax.max(d);
            }
        }
    }
    (dmin, dmax)
}
