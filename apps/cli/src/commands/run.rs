//! run 命令
//!
//! 用真实时钟仿真一个自动阶段

use anyhow::{Context, Result};
use auton_runner::{RunSummary, RunnerConfig, run_period};
use auton_state::{AutonomousState, MonotonicClock};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::config::load_config;
use crate::routine::GearDelivery;

/// 仿真运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 阶段时长（秒，覆盖配置）
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// 控制频率（Hz，覆盖配置）
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// 最大循环次数（覆盖配置）
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// 使用 spin_sleep 低抖动休眠
    #[arg(long)]
    pub spin: bool,

    /// 平均速度（英寸/秒）
    #[arg(long, default_value_t = 48.0)]
    pub speed: f64,

    /// 目标距离（英寸）
    #[arg(long, default_value_t = 100.0)]
    pub target_distance: f64,
}

impl RunCommand {
    /// 合并配置文件和命令行覆盖项
    pub fn effective_config(&self) -> Result<RunnerConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(duration) = self.duration {
            config.period.duration_secs = duration;
        }
        if let Some(frequency) = self.frequency {
            config.control_loop.frequency_hz = frequency;
        }
        if self.max_iterations.is_some() {
            config.control_loop.max_iterations = self.max_iterations;
        }
        if self.spin {
            config.control_loop.spin = true;
        }

        Ok(config)
    }

    /// 执行仿真
    pub fn execute(&self) -> Result<()> {
        let config = self.effective_config()?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_handler = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            eprintln!("\nReceived interrupt signal. Stopping autonomous period...");
            stop_handler.store(true, Ordering::Release);
        })
        .context("设置信号处理失败")?;

        println!(
            "🤖 自动阶段: {:.1} 秒 @ {:.0} Hz",
            config.period.duration_secs, config.control_loop.frequency_hz
        );

        let mut state = AutonomousState::new(MonotonicClock::new());
        let routine = GearDelivery::new(self.speed, self.target_distance);
        let summary = run_period(&mut state, routine, &config, &stop)?;

        print_summary(&summary);
        Ok(())
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 运行结果:");
    println!("  结束原因: {:?}", summary.reason);
    println!("  循环次数: {}", summary.loops_run);
    println!("  耗时: {:.2} 秒", summary.elapsed_secs);
    println!("  行驶距离: {:.1}", summary.distance_traveled);
    println!("  已转向: {}", summary.turned);
    println!("  已放置齿轮: {}", summary.gear_placed);
}
