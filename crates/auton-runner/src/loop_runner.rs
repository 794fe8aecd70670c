//! Loop Runner - 自动阶段控制循环
//!
//! 按固定频率驱动一个 [`Routine`]，直到例程完成、阶段超时、达到迭代上限或被中断。
//!
//! # 每个周期
//!
//! 1. 检查停止标志 → `Interrupted`
//! 2. `state.time_remaining(duration)` ≤ 0 → `PeriodExpired`
//! 3. 达到 `max_iterations` → `IterationLimit`
//! 4. `routine.tick(state)`，然后 `state.increment_loop_count()`
//! 5. 休眠一个标称周期（`std::thread::sleep` 或 `spin_sleep`）
//!
//! # 示例
//!
//! ```rust,no_run
//! use auton_runner::{RunnerConfig, run_period};
//! use auton_state::{AutonomousState, MonotonicClock};
//! use std::sync::atomic::AtomicBool;
//! # use auton_runner::{Routine, RoutineStatus};
//! # use auton_state::Clock;
//! # struct Idle;
//! # impl Routine for Idle {
//! #     type Error = std::io::Error;
//! #     fn tick<C: Clock>(&mut self, _: &mut AutonomousState<C>) -> Result<RoutineStatus, Self::Error> {
//! #         Ok(RoutineStatus::Continue)
//! #     }
//! # }
//!
//! let mut state = AutonomousState::new(MonotonicClock::new());
//! let stop = AtomicBool::new(false);
//! let summary = run_period(&mut state, Idle, &RunnerConfig::default(), &stop)?;
//! println!("{:?}", summary.reason);
//! # Ok::<(), auton_runner::RunnerError>(())
//! ```

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::routine::{Routine, RoutineStatus};
use auton_state::{AutonomousState, Clock};
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 循环结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 例程返回 `Finished`
    RoutineFinished,
    /// 阶段时间用完
    PeriodExpired,
    /// 达到 `max_iterations`
    IterationLimit,
    /// 停止标志被设置（例如 Ctrl+C）
    Interrupted,
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// 结束原因
    pub reason: StopReason,
    /// 完成的循环次数
    pub loops_run: u32,
    /// 结束时的已用时间（秒）
    pub elapsed_secs: f64,
    /// 结束时的累计距离
    pub distance_traveled: f64,
    /// 结束时是否已转向
    pub turned: bool,
    /// 结束时是否已放置齿轮
    pub gear_placed: bool,
}

impl RunSummary {
    fn capture<C: Clock>(reason: StopReason, state: &mut AutonomousState<C>) -> Self {
        RunSummary {
            reason,
            loops_run: state.loops_run(),
            elapsed_secs: state.elapsed_time(),
            distance_traveled: state.distance_traveled(),
            turned: state.is_turned(),
            gear_placed: state.is_gear_placed(),
        }
    }
}

/// 运行一个自动阶段
///
/// 使用 `config.control_loop.spin` 选择休眠方式。
/// 这是一个阻塞函数。
///
/// # 返回
///
/// - `Ok(summary)`: 正常结束，见 [`StopReason`]
/// - `Err(RunnerError::Config)`: 配置非法，`state` 未被修改
/// - `Err(RunnerError::Routine)`: 例程出错，循环中止
pub fn run_period<C, R>(
    state: &mut AutonomousState<C>,
    routine: R,
    config: &RunnerConfig,
    stop: &AtomicBool,
) -> Result<RunSummary, RunnerError>
where
    C: Clock,
    R: Routine,
{
    if config.control_loop.spin {
        let sleeper = SpinSleeper::default();
        run_period_with(state, routine, config, stop, |period| sleeper.sleep(period))
    } else {
        run_period_with(state, routine, config, stop, std::thread::sleep)
    }
}

/// 使用自定义休眠函数运行一个自动阶段
///
/// 仿真或测试中可以传入推进 `ManualClock` 的闭包代替真实休眠。
pub fn run_period_with<C, R, S>(
    state: &mut AutonomousState<C>,
    mut routine: R,
    config: &RunnerConfig,
    stop: &AtomicBool,
    mut sleep: S,
) -> Result<RunSummary, RunnerError>
where
    C: Clock,
    R: Routine,
    S: FnMut(Duration),
{
    config.validate()?;

    let duration = config.period.duration_secs;
    let nominal_period = config.nominal_period();

    state.init();
    state.set_start_time();
    routine
        .start(state)
        .map_err(|e| RunnerError::routine(state.loops_run(), e))?;

    tracing::info!(
        duration_secs = duration,
        frequency_hz = config.control_loop.frequency_hz,
        "autonomous period started"
    );

    let reason = loop {
        if stop.load(Ordering::Acquire) {
            break StopReason::Interrupted;
        }

        if state.time_remaining(duration) <= 0.0 {
            break StopReason::PeriodExpired;
        }

        if let Some(max_iter) = config.control_loop.max_iterations
            && state.loops_run() >= max_iter
        {
            break StopReason::IterationLimit;
        }

        let status = routine
            .tick(state)
            .map_err(|e| RunnerError::routine(state.loops_run(), e))?;
        state.increment_loop_count();

        if status == RoutineStatus::Finished {
            break StopReason::RoutineFinished;
        }

        sleep(nominal_period);
    };

    let summary = RunSummary::capture(reason, state);
    tracing::info!(
        reason = ?summary.reason,
        loops_run = summary.loops_run,
        elapsed_secs = summary.elapsed_secs,
        "autonomous period stopped"
    );

    Ok(summary)
}
