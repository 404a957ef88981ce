// apps/am_cli/src/commands/info.rs

//! info 子命令: 构建与物理配置信息

use am_physics::prelude::*;
use clap::Args;
use tracing::info;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// 列出可用的黎曼求解器与重构器
    #[arg(long, default_value_t = false)]
    schemes: bool,
}

/// 执行 info 子命令
pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    info!("AstroMHD {}", env!("CARGO_PKG_VERSION"));
    info!("方向非分裂 van Leer 预报-校正积分器, 约束输运磁场");

    if args.schemes {
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let solvers: Vec<Box<dyn RiemannSolver>> =
            vec![Box::new(Hlle::new(eos)), Box::new(Rusanov::new(eos))];
        for s in &solvers {
            let caps = s.capabilities();
            info!(
                name = s.name(),
                mhd = caps.handles_mhd,
                contact = caps.contact_resolving,
                eta_floor = caps.dissipation_floor,
                "黎曼求解器"
            );
        }
        let recons: Vec<Box<dyn Reconstruction>> = vec![
            Box::new(PiecewiseConstant::new()),
            Box::new(PiecewiseLinear::new()),
        ];
        for r in &recons {
            info!(name = r.name(), stencil = r.stencil_width(), "重构器");
        }
    }
    Ok(())
}
