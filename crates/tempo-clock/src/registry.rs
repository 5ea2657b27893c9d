//! The set of virtual clocks owned by the engine

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use tempo_core::{Speed, TempoResult, TimeSource};

use crate::VirtualClock;

/// The two tick-count widths derive from the same underlying counter and
/// therefore share one lock.
struct TickClocks {
    narrow: VirtualClock<u32>,
    wide: VirtualClock<u64>,
}

/// Owns one virtual clock per real time source exposed to the target.
///
/// Clocks are partitioned into three lock families: the high-resolution
/// counter, the two tick-count widths, and the multimedia timer. The locks
/// are reentrant because a rebase read nests inside the rate-change hold,
/// and every multi-family path acquires them in the fixed order counter,
/// ticks, timer.
///
/// Readers observe a family either fully-old or fully-new; a rate change is
/// never visible half-applied.
pub struct ClockRegistry {
    source: Arc<dyn TimeSource>,
    counter: ReentrantMutex<RefCell<VirtualClock<i64>>>,
    ticks: ReentrantMutex<RefCell<TickClocks>>,
    timer: ReentrantMutex<RefCell<VirtualClock<u32>>>,
}

impl ClockRegistry {
    /// Sample every source once and start all clocks at real time, speed 1.0.
    pub fn new(source: Arc<dyn TimeSource>) -> TempoResult<Self> {
        let counter = source.counter()?;
        let narrow = source.ticks_32();
        let wide = source.ticks_64();
        let timer = source.timer_ms();
        Ok(ClockRegistry {
            source,
            counter: ReentrantMutex::new(RefCell::new(VirtualClock::new(counter))),
            ticks: ReentrantMutex::new(RefCell::new(TickClocks {
                narrow: VirtualClock::new(narrow),
                wide: VirtualClock::new(wide),
            })),
            timer: ReentrantMutex::new(RefCell::new(VirtualClock::new(timer))),
        })
    }

    /// Virtual high-resolution counter value.
    pub fn read_counter(&self) -> TempoResult<i64> {
        let guard = self.counter.lock();
        let now = self.source.counter()?;
        let value = guard.borrow().get(now);
        Ok(value)
    }

    /// Virtual 32-bit millisecond tick count.
    pub fn read_ticks_32(&self) -> u32 {
        let guard = self.ticks.lock();
        let now = self.source.ticks_32();
        let value = guard.borrow().narrow.get(now);
        value
    }

    /// Virtual 64-bit millisecond tick count.
    pub fn read_ticks_64(&self) -> u64 {
        let guard = self.ticks.lock();
        let now = self.source.ticks_64();
        let value = guard.borrow().wide.get(now);
        value
    }

    /// Virtual multimedia timer milliseconds.
    pub fn read_timer_ms(&self) -> u32 {
        let guard = self.timer.lock();
        let now = self.source.timer_ms();
        let value = guard.borrow().get(now);
        value
    }

    /// Current speed factor.
    pub fn speed(&self) -> f64 {
        self.counter.lock().borrow().speed()
    }

    /// Rebase every clock to `new_speed` without a discontinuity.
    ///
    /// Negative and NaN factors are rejected before any clock is touched.
    /// All three families are held for the whole update, so a concurrent
    /// reader of any clock sees either the fully-old or the fully-new state.
    pub fn apply_rate_change(&self, new_speed: f64) -> TempoResult<()> {
        let speed = Speed::new(new_speed)?;

        let _counter = self.counter.lock();
        let _ticks = self.ticks.lock();
        let _timer = self.timer.lock();

        // The fallible family goes first: a counter read failure leaves the
        // whole registry untouched.
        self.rebase_counter(speed)?;
        self.rebase_ticks(speed);
        self.rebase_timer(speed);
        Ok(())
    }

    // Each rebase re-acquires its family lock; the outer hold in
    // `apply_rate_change` is what makes the read-then-write indivisible.

    fn rebase_counter(&self, speed: Speed) -> TempoResult<()> {
        let guard = self.counter.lock();
        let now = self.source.counter()?;
        let virtual_now = guard.borrow().get(now);
        let mut clock = guard.borrow_mut();
        clock.set_offsets(now, virtual_now);
        clock.set_speed(speed.factor());
        Ok(())
    }

    fn rebase_ticks(&self, speed: Speed) {
        let guard = self.ticks.lock();
        let now_narrow = self.source.ticks_32();
        let now_wide = self.source.ticks_64();
        let virtual_narrow = guard.borrow().narrow.get(now_narrow);
        let virtual_wide = guard.borrow().wide.get(now_wide);
        let mut clocks = guard.borrow_mut();
        clocks.narrow.set_offsets(now_narrow, virtual_narrow);
        clocks.narrow.set_speed(speed.factor());
        clocks.wide.set_offsets(now_wide, virtual_wide);
        clocks.wide.set_speed(speed.factor());
    }

    fn rebase_timer(&self, speed: Speed) {
        let guard = self.timer.lock();
        let now = self.source.timer_ms();
        let virtual_now = guard.borrow().get(now);
        let mut clock = guard.borrow_mut();
        clock.set_offsets(now, virtual_now);
        clock.set_speed(speed.factor());
    }
}
