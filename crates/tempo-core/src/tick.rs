//! Native-width tick arithmetic for the virtualized time sources
//!
//! Each real time source reports in its own integer width: signed 64-bit
//! counts for the high-resolution counter, unsigned 32-bit milliseconds for
//! the narrow tick counter and the multimedia timer, unsigned 64-bit
//! milliseconds for the wide tick counter. Rescaling has to happen in that
//! native arithmetic so wrap-around behaves exactly like the real source.

use std::fmt;

/// Raw value of one time source in its native integer width.
pub trait RawTick: Copy + Eq + fmt::Debug + Send + 'static {
    /// Wrapping difference `self - earlier`.
    fn delta_since(self, earlier: Self) -> Self;

    /// Multiply by a non-negative factor, truncating like a native cast.
    fn scale(self, factor: f64) -> Self;

    /// Wrapping addition.
    fn offset_by(self, offset: Self) -> Self;
}

impl RawTick for i64 {
    #[inline]
    fn delta_since(self, earlier: Self) -> Self {
        self.wrapping_sub(earlier)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        (self as f64 * factor) as i64
    }

    #[inline]
    fn offset_by(self, offset: Self) -> Self {
        self.wrapping_add(offset)
    }
}

impl RawTick for u64 {
    #[inline]
    fn delta_since(self, earlier: Self) -> Self {
        self.wrapping_sub(earlier)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        (self as f64 * factor) as u64
    }

    #[inline]
    fn offset_by(self, offset: Self) -> Self {
        self.wrapping_add(offset)
    }
}

impl RawTick for u32 {
    #[inline]
    fn delta_since(self, earlier: Self) -> Self {
        self.wrapping_sub(earlier)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        (self as f64 * factor) as u32
    }

    #[inline]
    fn offset_by(self, offset: Self) -> Self {
        self.wrapping_add(offset)
    }
}
