//! Browser time source

use jobdeck_core::Clock;

/// Epoch seconds from the browser clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_secs(&self) -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }
}
