#![allow(clippy::missing_safety_doc)]
//! Tempo Hook - substitute time query entry points
//!
//! The interception layer redirects the target process's time queries to the
//! functions in this crate. Each substitute keeps the exact shape of the
//! real API it stands in for, so the target cannot tell virtual time from
//! real time except by its rescaled rate.
//!
//! How calls are physically redirected is the interception layer's business;
//! this crate only defines the substitutes' semantics.

pub mod entry;

use std::sync::{Arc, OnceLock};

use tempo_clock::ClockRegistry;
use tempo_core::{TempoError, TempoResult};

pub use entry::*;

static ENGINE: OnceLock<Arc<ClockRegistry>> = OnceLock::new();

/// Install the process-wide engine instance.
///
/// Must be called once, before the interception layer redirects the first
/// time query. The instance lives until process teardown; there is no
/// uninstall.
pub fn install(registry: Arc<ClockRegistry>) -> TempoResult<()> {
    ENGINE
        .set(registry)
        .map_err(|_| TempoError::AlreadyInstalled)
}

/// The installed engine instance.
pub fn engine() -> TempoResult<&'static Arc<ClockRegistry>> {
    ENGINE.get().ok_or(TempoError::NotInstalled)
}
