//! Routine trait - 自动例程通用接口
//!
//! # 设计理念
//!
//! - **Tick 模式**: 运行器掌管循环和计时，例程只负责一步决策
//! - **显式传参**: 每次调用都传入 `&mut AutonomousState`，不存在全局状态
//! - **错误处理**: 关联类型 `Error` 允许自定义错误
//!
//! # 示例
//!
//! ```rust
//! use auton_runner::{Routine, RoutineStatus};
//! use auton_state::{AutonomousState, Clock};
//!
//! struct DriveFor {
//!     secs: f64,
//! }
//!
//! impl Routine for DriveFor {
//!     type Error = std::io::Error;
//!
//!     fn tick<C: Clock>(
//!         &mut self,
//!         state: &mut AutonomousState<C>,
//!     ) -> Result<RoutineStatus, Self::Error> {
//!         if state.elapsed_time() >= self.secs {
//!             Ok(RoutineStatus::Finished)
//!         } else {
//!             Ok(RoutineStatus::Continue)
//!         }
//!     }
//! }
//! ```

use auton_state::{AutonomousState, Clock};

/// 一步执行后的例程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineStatus {
    /// 继续下一次循环
    Continue,
    /// 例程已完成，运行器停止循环
    Finished,
}

/// 自动例程
///
/// # 生命周期
///
/// - **开始**: 运行器调用 `state.init()`、`state.set_start_time()` 后调用 `start()`
/// - **运行**: 每个周期调用一次 `tick()`，随后运行器记录一次循环
/// - **结束**: `tick()` 返回 `Finished`、阶段超时或被中断
pub trait Routine {
    /// 例程错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 阶段开始时调用一次
    ///
    /// 默认实现不做任何事情。
    fn start<C: Clock>(&mut self, _state: &mut AutonomousState<C>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// 执行一步
    fn tick<C: Clock>(
        &mut self,
        state: &mut AutonomousState<C>,
    ) -> Result<RoutineStatus, Self::Error>;
}

impl<R: Routine> Routine for &mut R {
    type Error = R::Error;

    fn start<C: Clock>(&mut self, state: &mut AutonomousState<C>) -> Result<(), Self::Error> {
        (**self).start(state)
    }

    fn tick<C: Clock>(
        &mut self,
        state: &mut AutonomousState<C>,
    ) -> Result<RoutineStatus, Self::Error> {
        (**self).tick(state)
    }
}
