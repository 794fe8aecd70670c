//! # Auton CLI
//!
//! Command-line simulator for autonomous period runs.
//!
//! ```bash
//! # 生成默认配置
//! auton-cli config init auton.toml
//!
//! # 用配置文件运行，覆盖频率
//! auton-cli run --config auton.toml --frequency 100
//!
//! # 查看日志细节
//! RUST_LOG=auton_state=debug auton-cli run --duration 3
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod routine;

use commands::{ConfigCommand, RunCommand};

/// Auton CLI - 自动阶段仿真工具
#[derive(Parser, Debug)]
#[command(name = "auton-cli")]
#[command(about = "Command-line simulator for autonomous period runs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 仿真一个自动阶段
    Run {
        #[command(flatten)]
        args: RunCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("auton_cli=info".parse()?)
                .add_directive("auton_runner=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),

        Commands::Run { args } => args.execute(),
    }
}
