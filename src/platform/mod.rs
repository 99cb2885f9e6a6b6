//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (js `Date` on web, `SystemTime` native)

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_MS: AtomicU64 = AtomicU64::new(0);

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Strictly increasing within a process, so item timestamps always advance
/// on mutation even when two mutations land in the same millisecond.
pub fn now_ms() -> u64 {
    let wall = wall_clock_ms();
    loop {
        let last = LAST_MS.load(Ordering::Relaxed);
        let next = wall.max(last + 1);
        if LAST_MS
            .compare_exchange(last, next, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            return next;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn wall_clock_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn wall_clock_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_strictly_increases() {
        let a = now_ms();
        let b = now_ms();
        let c = now_ms();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_now_ms_is_wall_clock_scale() {
        // Sanity: after 2020-01-01 and before 2100-01-01
        let now = now_ms();
        assert!(now > 1_577_836_800_000);
        assert!(now < 4_102_444_800_000);
    }
}
