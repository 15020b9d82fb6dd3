//! Time source abstraction.
//!
//! Expiry math runs against an injected clock so the browser build can read
//! `Date.now()` while native tests pin time to a fixed instant.

/// Epoch-seconds time source.
pub trait Clock {
    fn now_secs(&self) -> i64;
}

/// Wall-clock time on native targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock pinned to a settable instant, for tests.
#[cfg(any(test, feature = "tests"))]
pub struct FixedClock {
    now: std::cell::Cell<i64>,
}

#[cfg(any(test, feature = "tests"))]
impl FixedClock {
    pub fn new(now_secs: i64) -> Self {
        Self {
            now: std::cell::Cell::new(now_secs),
        }
    }

    pub fn set(&self, now_secs: i64) {
        self.now.set(now_secs);
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get() + secs);
    }
}

#[cfg(any(test, feature = "tests"))]
impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.now.get()
    }
}
