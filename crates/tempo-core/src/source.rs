//! Real time sources behind the virtualization layer

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::TempoResult;

/// The un-intercepted real time sources of the host system.
///
/// One implementation backs all four source families: the high-resolution
/// counter, the two millisecond tick counters of different widths, and the
/// multimedia timer. The interception layer hands the original entry points
/// to an implementation of this trait, so virtualized reads observe the same
/// underlying counters as the target process would.
pub trait TimeSource: Send + Sync {
    /// High-resolution counter in native signed 64-bit counts.
    ///
    /// The only fallible source, matching the failure contract of the real
    /// query it stands behind.
    fn counter(&self) -> TempoResult<i64>;

    /// Millisecond tick count, 32-bit. Wraps roughly every 49.7 days.
    fn ticks_32(&self) -> u32;

    /// Millisecond tick count, 64-bit.
    fn ticks_64(&self) -> u64;

    /// Multimedia timer milliseconds, 32-bit.
    fn timer_ms(&self) -> u32;
}

/// Monotonic process-relative source backed by the OS clock.
///
/// Counter values are nanosecond counts since construction; the tick
/// families report milliseconds since construction.
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        SystemTimeSource {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn counter(&self) -> TempoResult<i64> {
        Ok(self.origin.elapsed().as_nanos() as i64)
    }

    fn ticks_32(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }

    fn ticks_64(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn timer_ms(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}

/// Hand-advanced source for deterministic tests.
///
/// Real time only moves when [`ManualTimeSource::advance`] is called; every
/// family derives from the same nanosecond counter.
pub struct ManualTimeSource {
    nanos: AtomicU64,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        ManualTimeSource {
            nanos: AtomicU64::new(0),
        }
    }

    /// Move real time forward.
    pub fn advance(&self, elapsed: Duration) {
        self.nanos
            .fetch_add(elapsed.as_nanos() as u64, Ordering::SeqCst);
    }

    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTimeSource {
    fn counter(&self) -> TempoResult<i64> {
        Ok(self.now_nanos() as i64)
    }

    fn ticks_32(&self) -> u32 {
        (self.now_nanos() / 1_000_000) as u32
    }

    fn ticks_64(&self) -> u64 {
        self.now_nanos() / 1_000_000
    }

    fn timer_ms(&self) -> u32 {
        (self.now_nanos() / 1_000_000) as u32
    }
}
