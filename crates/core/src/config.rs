//! Session tuning parameters.

use std::time::Duration;

/// Tunable parameters for token decoding and renewal timing.
///
/// The defaults match the production deployment. Nothing downstream assumes
/// they are well-tuned; callers that know better can override any of them.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Renew proactively this many seconds before expiry.
    pub proactive_buffer_secs: i64,
    /// When already inside the buffer, fire the timer at this fraction of
    /// the remaining lifetime instead (so it is never scheduled in the past).
    pub early_refresh_ratio: f64,
    /// Floor for the proactive timer delay.
    pub min_refresh_delay_secs: i64,
    /// Decoded-claims cache entries.
    pub decode_cache_capacity: usize,
    /// Outbound HTTP request timeout (native targets; browsers enforce
    /// their own).
    pub request_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            proactive_buffer_secs: 300,
            early_refresh_ratio: 0.5,
            min_refresh_delay_secs: 1,
            decode_cache_capacity: 10,
            request_timeout: Duration::from_secs(10),
        }
    }
}
