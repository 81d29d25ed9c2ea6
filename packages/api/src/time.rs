//! Wall-clock access that works on both native and wasm targets.
//!
//! `std::time::SystemTime` is unavailable on `wasm32-unknown-unknown`, so the
//! web build reads `Date.now()` instead.

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
