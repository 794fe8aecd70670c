//! 仿真例程：直行 → 转向 → 放置齿轮
//!
//! 没有真实底盘，距离按 `calculate_distance_traveled(dt, speed)` 积分，
//! `dt` 取相邻两次 `elapsed_time()` 的差值。

use auton_runner::{Routine, RoutineStatus};
use auton_state::{AutonomousState, Clock};
use thiserror::Error;

/// 仿真例程错误
#[derive(Debug, Error)]
pub enum RoutineError {
    /// 速度必须为正
    #[error("Invalid speed: {0} (must be > 0)")]
    InvalidSpeed(f64),

    /// 目标距离必须为非负数
    #[error("Invalid target distance: {0} (must be >= 0)")]
    InvalidTarget(f64),
}

/// 直行到目标距离，转向，然后放置齿轮
#[derive(Debug, Clone)]
pub struct GearDelivery {
    /// 平均速度（英寸/秒）
    speed: f64,
    /// 目标距离（英寸）
    target_distance: f64,
    /// 上一次 tick 的已用时间
    last_elapsed: f64,
}

impl GearDelivery {
    pub fn new(speed: f64, target_distance: f64) -> Self {
        GearDelivery {
            speed,
            target_distance,
            last_elapsed: 0.0,
        }
    }
}

impl Routine for GearDelivery {
    type Error = RoutineError;

    fn start<C: Clock>(&mut self, state: &mut AutonomousState<C>) -> Result<(), Self::Error> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(RoutineError::InvalidSpeed(self.speed));
        }
        if !self.target_distance.is_finite() || self.target_distance < 0.0 {
            return Err(RoutineError::InvalidTarget(self.target_distance));
        }

        // init() 不会清除 turned，新的一轮需要自己清
        state.set_turned(false);
        self.last_elapsed = 0.0;
        Ok(())
    }

    fn tick<C: Clock>(
        &mut self,
        state: &mut AutonomousState<C>,
    ) -> Result<RoutineStatus, Self::Error> {
        let elapsed = state.elapsed_time();
        let dt = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;

        if !state.is_turned() {
            if state.distance_traveled() < self.target_distance {
                state.calculate_distance_traveled(dt, self.speed);
                return Ok(RoutineStatus::Continue);
            }

            state.set_turned(true);
            tracing::info!(
                distance = state.distance_traveled(),
                turn_correction = state.turn_const(),
                elapsed,
                "target reached, turned toward peg"
            );
            return Ok(RoutineStatus::Continue);
        }

        state.set_gear_placed(true);
        tracing::info!(elapsed, loops = state.loops_run(), "gear placed");
        Ok(RoutineStatus::Finished)
    }
}
