//! # Auton State - 自动阶段状态跟踪
//!
//! **依赖原则**: 只依赖 `tracing`，不依赖任何硬件或运行时
//!
//! ## 包含模块
//!
//! - `clock` - 单调时间源（`Clock` trait 及实现）
//! - `state` - 自动阶段状态（计数器、计时器、标志位、距离累加）
//!
//! ## 使用示例
//!
//! ```rust
//! use auton_state::{AutonomousState, MonotonicClock};
//!
//! let mut state = AutonomousState::new(MonotonicClock::new());
//! state.init();
//! state.set_start_time();
//!
//! // 控制循环中
//! state.increment_loop_count();
//! if state.time_remaining(15.0) > 0.0 {
//!     state.calculate_distance_traveled(0.02, 48.0);
//! }
//! ```

pub mod clock;
pub mod state;

// 重新导出常用类型
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use state::AutonomousState;
