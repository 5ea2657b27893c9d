//! The four substitute time functions
//!
//! Invoked concurrently from arbitrary threads at arbitrary frequency. No
//! allocation happens here; the only blocking is the family lock acquisition
//! inside the registry.

use crate::engine;

/// Substitute for the high-resolution performance counter query.
///
/// Writes the virtual counter value through `counter` and returns nonzero on
/// success. Returns zero when the counter cannot be read, matching the
/// failure contract of the real query.
#[no_mangle]
pub unsafe extern "system" fn virtual_query_performance_counter(counter: *mut i64) -> i32 {
    if counter.is_null() {
        return 0;
    }
    let Ok(registry) = engine() else {
        return 0;
    };
    match registry.read_counter() {
        Ok(value) => {
            *counter = value;
            1
        }
        Err(_) => 0,
    }
}

/// Substitute for the 32-bit millisecond tick counter.
#[no_mangle]
pub extern "system" fn virtual_get_tick_count() -> u32 {
    match engine() {
        Ok(registry) => registry.read_ticks_32(),
        Err(_) => 0,
    }
}

/// Substitute for the 64-bit millisecond tick counter.
#[no_mangle]
pub extern "system" fn virtual_get_tick_count64() -> u64 {
    match engine() {
        Ok(registry) => registry.read_ticks_64(),
        Err(_) => 0,
    }
}

/// Substitute for the multimedia timer millisecond query.
#[no_mangle]
pub extern "system" fn virtual_time_get_time() -> u32 {
    match engine() {
        Ok(registry) => registry.read_timer_ms(),
        Err(_) => 0,
    }
}
