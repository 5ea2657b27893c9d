//! Per-source rescaling state

use tempo_core::RawTick;

/// Virtual clock for one time source family.
///
/// Reports `speed * (now - initial_time) + initial_offset` in the source's
/// native arithmetic. The `initial_time`/`initial_offset` pair is the rebase
/// point; capturing `initial_offset` from the old-speed value at the rebase
/// instant keeps the reported time continuous across speed changes.
/// INVARIANT: for `speed >= 0` the reported value never decreases as `now`
/// advances.
///
/// No internal locking. Single-writer multi-reader discipline is the
/// registry's responsibility.
#[derive(Clone, Copy, Debug)]
pub struct VirtualClock<T: RawTick> {
    initial_time: T,
    initial_offset: T,
    speed: f64,
}

impl<T: RawTick> VirtualClock<T> {
    /// New clock reporting unscaled time from `now` on.
    pub fn new(now: T) -> Self {
        VirtualClock {
            initial_time: now,
            initial_offset: now,
            speed: 1.0,
        }
    }

    /// Virtual time at real time `now`. Pure; never mutates.
    #[inline]
    pub fn get(&self, now: T) -> T {
        now.delta_since(self.initial_time)
            .scale(self.speed)
            .offset_by(self.initial_offset)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Replace the speed factor.
    ///
    /// Does not rebase. Changing the speed of a live clock without a
    /// surrounding rebase pairs the new speed with offsets captured under
    /// the old one, and the next `get` jumps.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Rebase point: virtual time `virtual_now` is reported at real `now`.
    pub fn set_offsets(&mut self, now: T, virtual_now: T) {
        self.initial_time = now;
        self.initial_offset = virtual_now;
    }
}
