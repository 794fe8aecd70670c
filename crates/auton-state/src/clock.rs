//! # 时钟
//!
//! 自动阶段状态只需要一个单调的"秒"时间源。
//!
//! | 实现 | 来源 | 用途 |
//! |------|------|------|
//! | [`MonotonicClock`] | `std::time::Instant` | 实机 / 仿真运行 |
//! | [`ManualClock`] | 手动推进 | 单元测试、确定性仿真 |
//!
//! 时钟通过参数显式传入 [`AutonomousState`](crate::AutonomousState)，
//! 不存在全局时钟单例。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// 单调时间源
///
/// `now()` 返回秒（`f64`），在一次程序运行内单调不减。
/// 零点由实现决定（例如时钟创建时刻），调用方只应使用差值。
pub trait Clock {
    /// 当前时间（秒）
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    #[inline]
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// 基于 `Instant` 的单调时钟
///
/// 返回自时钟创建以来经过的秒数，相当于控制器上电后的硬件时间戳。
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// 以当前时刻为零点创建时钟
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// 手动推进的时钟
///
/// 克隆体共享同一个时间值：把一个克隆交给 `AutonomousState`，
/// 在测试里用另一个克隆推进时间。
///
/// 时间以 `f64` 位模式存放在 `AtomicU64` 中，因此 `ManualClock` 是 `Send + Sync`。
///
/// # 示例
///
/// ```rust
/// use auton_state::{Clock, ManualClock};
///
/// let clock = ManualClock::new(10.0);
/// let handle = clock.clone();
/// handle.advance(2.5);
/// assert_eq!(clock.now(), 12.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// 创建时钟，初始时间为 `start_secs`
    pub fn new(start_secs: f64) -> Self {
        ManualClock {
            bits: Arc::new(AtomicU64::new(start_secs.to_bits())),
        }
    }

    /// 设置当前时间
    ///
    /// 不检查单调性，倒退时间由调用方负责。
    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Release);
    }

    /// 推进时间 `secs` 秒
    pub fn advance(&self, secs: f64) {
        // 多个克隆可能并发推进，必须是原子的读-改-写
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + secs).to_bits())
            });
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}
