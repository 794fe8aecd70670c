//! # 自动阶段状态
//!
//! 自动阶段（Autonomous period）内控制循环使用的计数器、计时器和标志位。
//!
//! # 生命周期
//!
//! - 控制器在程序生命周期内持有**一个**实例
//! - 每个自动阶段开始时调用一次 [`init()`](AutonomousState::init)
//! - 每次循环迭代读写计数器/累加器，并查询已用时间、剩余时间
//!
//! # ⚠️ `init()` 的重置范围
//!
//! `init()` 只重置循环计数、距离、已用时间、起始时间和放置标志，
//! **不会**重置 `turned` 和 `range`。跨 `init()` 保留这两个值是既有行为，保持不变。
//!
//! # 示例
//!
//! ```rust
//! use auton_state::{AutonomousState, ManualClock};
//!
//! let clock = ManualClock::new(10.0);
//! let mut state = AutonomousState::new(clock.clone());
//!
//! state.init();
//! state.set_start_time();
//! clock.advance(2.0);
//!
//! state.calculate_distance_traveled(2.0, 3.0);
//! state.increment_loop_count();
//!
//! assert_eq!(state.distance_traveled(), 6.0);
//! assert_eq!(state.loops_run(), 1);
//! assert_eq!(state.time_remaining(15.0), 13.0);
//! ```

use crate::clock::{Clock, MonotonicClock};

/// 自动阶段状态
///
/// 单线程使用：由一个控制循环持有并通过 `&mut` 传递给需要它的例程。
/// 所有操作都是全函数，不返回错误。
#[derive(Debug, Clone)]
pub struct AutonomousState<C = MonotonicClock> {
    /// 时间源
    clock: C,

    /// 自上次 `init()` 以来的循环次数
    loops_run: u32,

    /// 起始时间锚点（秒），`None` 表示尚未开始
    start_time: Option<f64>,

    /// 最近一次计算出的已用时间（缓存值，非权威）
    time_elapsed: f64,

    /// 是否已完成转向动作
    turned: bool,

    /// 是否已放置齿轮（游戏道具）
    gear_placed: bool,

    /// 超声波测距读数，目前没有任何代码写入
    range: f64,

    /// 累计行驶距离（单位由调用方决定）
    distance_traveled: f64,
}

impl<C: Clock> AutonomousState<C> {
    /// 自动转向漂移修正量
    ///
    /// 由外部转向逻辑叠加到转向输出上，本类型从不修改它。
    pub const TURN_CONST: f64 = -0.02;

    /// 使用给定时钟创建状态，所有字段为零值
    pub fn new(clock: C) -> Self {
        AutonomousState {
            clock,
            loops_run: 0,
            start_time: None,
            time_elapsed: 0.0,
            turned: false,
            gear_placed: false,
            range: 0.0,
            distance_traveled: 0.0,
        }
    }

    /// 重新装载一个自动阶段
    ///
    /// 重置：循环计数、累计距离、已用时间、起始时间、放置标志。
    /// 保留：`turned`、`range`。
    pub fn init(&mut self) {
        self.loops_run = 0;
        self.distance_traveled = 0.0;
        self.time_elapsed = 0.0;
        self.start_time = None;
        self.gear_placed = false;

        tracing::debug!(turned = self.turned, "autonomous state initialized");
    }

    /// 自上次 `init()` 以来记录的循环次数
    pub fn loops_run(&self) -> u32 {
        self.loops_run
    }

    /// 记录一次循环
    ///
    /// 溢出时回绕；极长时间运行的计数由调用方负责。
    pub fn increment_loop_count(&mut self) {
        self.loops_run = self.loops_run.wrapping_add(1);
    }

    // ==================== 距离 ====================

    /// 自上次重置以来的累计距离
    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    /// 向累计距离**加上** `distance`
    ///
    /// 语义是累加而不是赋值，连续两次调用得到两者之和。
    pub fn add_distance(&mut self, distance: f64) {
        self.distance_traveled += distance;
    }

    /// 按**平均**速度和时间累加距离：`distance += time * speed`
    ///
    /// # 参数
    ///
    /// - `time`: 以 `speed` 行驶的时间
    /// - `speed`: 该时间段内的平均速度
    ///
    /// 不做单位校验。
    pub fn calculate_distance_traveled(&mut self, time: f64, speed: f64) {
        self.distance_traveled += time * speed;
    }

    /// 累计距离清零
    pub fn reset_distance_traveled(&mut self) {
        self.distance_traveled = 0.0;
    }

    // ==================== 时间 ====================

    /// 从时钟读取当前时间作为起始锚点
    pub fn set_start_time(&mut self) {
        let now = self.clock.now();
        self.start_time = Some(now);
        tracing::debug!(start_time = now, "autonomous start time set");
    }

    /// 起始锚点，`None` 表示尚未调用 `set_start_time()`
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// 自 `set_start_time()` 以来经过的秒数
    ///
    /// 尚未设置起始时间时返回 `0.0`，且不更新缓存值。
    pub fn elapsed_time(&mut self) -> f64 {
        let now = self.clock.now();
        match self.start_time {
            Some(start) => {
                self.time_elapsed = now - start;
                tracing::trace!(elapsed = self.time_elapsed, "elapsed time computed");
                self.time_elapsed
            },
            None => 0.0,
        }
    }

    /// 最近一次 `elapsed_time()` 缓存的值
    pub fn last_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    /// 距离 `end_time` 秒时长还剩多少秒
    ///
    /// 超时后为负数，不做钳位，调用方需检查符号。
    pub fn time_remaining(&mut self, end_time: f64) -> f64 {
        end_time - self.elapsed_time()
    }

    // ==================== 标志位 ====================

    /// 设置是否已完成转向
    pub fn set_turned(&mut self, is_turned: bool) {
        self.turned = is_turned;
    }

    /// 是否已完成转向
    pub fn is_turned(&self) -> bool {
        self.turned
    }

    /// 设置是否已放置齿轮
    pub fn set_gear_placed(&mut self, placed: bool) {
        self.gear_placed = placed;
    }

    /// 是否已放置齿轮
    pub fn is_gear_placed(&self) -> bool {
        self.gear_placed
    }

    /// 测距读数
    ///
    /// 没有接入测距传感器，始终返回 `0.0`。
    pub fn range(&self) -> f64 {
        self.range
    }

    /// 转向漂移修正量，见 [`TURN_CONST`](Self::TURN_CONST)
    pub fn turn_const(&self) -> f64 {
        Self::TURN_CONST
    }

    /// 时间源
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl Default for AutonomousState<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manual_state(start: f64) -> (ManualClock, AutonomousState<ManualClock>) {
        let clock = ManualClock::new(start);
        let state = AutonomousState::new(clock.clone());
        (clock, state)
    }

    #[test]
    fn test_new_state_is_zeroed() {
        let (_clock, state) = manual_state(0.0);
        assert_eq!(state.loops_run(), 0);
        assert_eq!(state.distance_traveled(), 0.0);
        assert_eq!(state.start_time(), None);
        assert_eq!(state.last_elapsed(), 0.0);
        assert!(!state.is_turned());
        assert!(!state.is_gear_placed());
        assert_eq!(state.range(), 0.0);
    }

    #[test]
    fn test_loop_count() {
        let (_clock, mut state) = manual_state(0.0);
        state.init();
        for _ in 0..5 {
            state.increment_loop_count();
        }
        assert_eq!(state.loops_run(), 5);
    }

    #[test]
    fn test_loop_count_wraps_instead_of_panicking() {
        let (_clock, mut state) = manual_state(0.0);
        state.loops_run = u32::MAX;
        state.increment_loop_count();
        assert_eq!(state.loops_run(), 0);
    }

    #[test]
    fn test_add_distance_accumulates() {
        let (_clock, mut state) = manual_state(0.0);
        state.init();
        state.add_distance(1.5);
        state.add_distance(2.0);
        assert_eq!(state.distance_traveled(), 3.5);
    }

    #[test]
    fn test_calculate_distance_traveled() {
        let (_clock, mut state) = manual_state(0.0);
        state.init();
        state.calculate_distance_traveled(2.0, 3.0);
        assert_eq!(state.distance_traveled(), 6.0);

        state.calculate_distance_traveled(0.5, -4.0);
        assert_eq!(state.distance_traveled(), 4.0);
    }

    #[test]
    fn test_reset_distance_traveled() {
        let (_clock, mut state) = manual_state(0.0);
        state.add_distance(42.0);
        state.reset_distance_traveled();
        assert_eq!(state.distance_traveled(), 0.0);
    }

    #[test]
    fn test_elapsed_time_before_start_is_zero() {
        let (clock, mut state) = manual_state(100.0);
        clock.advance(3.0);
        assert_eq!(state.elapsed_time(), 0.0);
        // 未开始时不更新缓存
        assert_eq!(state.last_elapsed(), 0.0);
    }

    #[test]
    fn test_elapsed_time_after_start() {
        let (clock, mut state) = manual_state(10.0);
        state.set_start_time();
        assert_eq!(state.start_time(), Some(10.0));

        clock.set(12.5);
        assert_eq!(state.elapsed_time(), 2.5);
        assert_eq!(state.last_elapsed(), 2.5);
    }

    #[test]
    fn test_start_at_time_zero_is_still_started() {
        let (clock, mut state) = manual_state(0.0);
        state.set_start_time();
        clock.advance(1.25);
        assert_eq!(state.elapsed_time(), 1.25);
    }

    #[test]
    fn test_time_remaining_is_not_clamped() {
        let (clock, mut state) = manual_state(0.0);
        state.set_start_time();

        clock.set(2.5);
        assert_eq!(state.time_remaining(5.0), 2.5);

        clock.set(7.0);
        assert_eq!(state.time_remaining(5.0), -2.0);
    }

    #[test]
    fn test_time_remaining_before_start_is_full_duration() {
        let (_clock, mut state) = manual_state(50.0);
        assert_eq!(state.time_remaining(15.0), 15.0);
    }

    #[test]
    fn test_flags() {
        let (_clock, mut state) = manual_state(0.0);
        state.set_turned(true);
        state.set_gear_placed(true);
        assert!(state.is_turned());
        assert!(state.is_gear_placed());

        state.set_turned(false);
        assert!(!state.is_turned());
    }

    #[test]
    fn test_init_reset_set() {
        let (clock, mut state) = manual_state(1.0);
        state.increment_loop_count();
        state.add_distance(10.0);
        state.set_start_time();
        clock.advance(4.0);
        state.elapsed_time();
        state.set_gear_placed(true);
        state.set_turned(true);

        state.init();

        assert_eq!(state.loops_run(), 0);
        assert_eq!(state.distance_traveled(), 0.0);
        assert_eq!(state.last_elapsed(), 0.0);
        assert_eq!(state.start_time(), None);
        assert!(!state.is_gear_placed());
        // 跨 init() 保留
        assert!(state.is_turned());
        assert_eq!(state.range(), 0.0);
    }

    #[test]
    fn test_flag_setters_do_not_touch_distance() {
        let (_clock, mut state) = manual_state(0.0);
        state.add_distance(3.0);
        state.set_turned(true);
        state.set_gear_placed(true);
        state.set_start_time();
        assert_eq!(state.distance_traveled(), 3.0);
    }

    #[test]
    fn test_turn_const() {
        let (_clock, state) = manual_state(0.0);
        assert_eq!(AutonomousState::<ManualClock>::TURN_CONST, -0.02);
        assert_eq!(state.turn_const(), -0.02);
    }
}
