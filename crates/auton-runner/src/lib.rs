//! # Auton Runner - 自动阶段运行器
//!
//! 把 [`auton_state::AutonomousState`] 接入固定频率的控制循环：
//!
//! - `config` - TOML 运行配置（阶段时长、循环频率）
//! - `routine` - `Routine` trait，例程每个周期执行一步
//! - `loop_runner` - 阻塞式控制循环
//! - `error` - 错误类型
//!
//! 状态通过 `&mut` 显式传给例程，运行器负责在阶段开始时调用
//! `init()` 和 `set_start_time()`，并在每次 `tick()` 后记录循环次数。

pub mod config;
pub mod error;
pub mod loop_runner;
pub mod routine;

// 重新导出常用类型
pub use config::{ConfigError, LoopSettings, PeriodSettings, RunnerConfig};
pub use error::RunnerError;
pub use loop_runner::{RunSummary, StopReason, run_period, run_period_with};
pub use routine::{Routine, RoutineStatus};
