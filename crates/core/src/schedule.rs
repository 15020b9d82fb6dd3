//! Proactive refresh timing.

use crate::config::SessionConfig;

/// When to fire the next proactive refresh, in milliseconds from now.
///
/// `None` means the token is already dead and no timer should be armed.
/// With plenty of lifetime left the timer lands one buffer before expiry;
/// inside the buffer it fires at a fraction of what remains, floored, so
/// scheduling degrades gracefully instead of landing in the past.
pub fn refresh_delay_ms(remaining_secs: i64, config: &SessionConfig) -> Option<u32> {
    if remaining_secs <= 0 {
        return None;
    }
    let delay_secs = if remaining_secs > config.proactive_buffer_secs {
        (remaining_secs - config.proactive_buffer_secs) as f64
    } else {
        (remaining_secs as f64 * config.early_refresh_ratio)
            .max(config.min_refresh_delay_secs as f64)
    };
    Some((delay_secs * 1000.0).min(u32::MAX as f64) as u32)
}
