// apps/am_cli/src/main.rs

//! AstroMHD 命令行界面
//!
//! 提供理想磁流体求解器的命令行工具：内置激波管算例驱动与
//! 构建信息查询。库层只返回 `AmResult`，二进制边界统一用
//! `anyhow` 收敛。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// AstroMHD 理想磁流体求解器命令行工具
#[derive(Parser)]
#[command(name = "am_cli")]
#[command(author = "AstroMHD Developers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AstroMHD ideal MHD solver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行内置激波管算例
    Run(commands::run::RunArgs),
    /// 显示构建与物理配置信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
