//! Speed factor applied to real elapsed time

use std::fmt;

use crate::{TempoError, TempoResult};

/// Multiplier applied to real elapsed time to produce virtual elapsed time.
///
/// `1.0` reports unscaled time, `0.0` freezes apparent time, factors above
/// `1.0` accelerate it. Negative and NaN factors are invalid and never make
/// it past [`Speed::new`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    /// Unscaled real time
    pub const REAL_TIME: Speed = Speed(1.0);
    /// Apparent time stands still
    pub const FROZEN: Speed = Speed(0.0);

    /// Validate a raw factor
    pub fn new(factor: f64) -> TempoResult<Self> {
        if factor.is_nan() || factor < 0.0 {
            return Err(TempoError::InvalidSpeed(factor));
        }
        Ok(Speed(factor))
    }

    #[inline]
    pub fn factor(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_frozen(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::REAL_TIME
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}
