//! Exponential backoff.

use std::time::Duration;

/// Delay before retry number `retry` (1-based): `initial * 2^(retry - 1)`.
pub fn calculate_backoff(retry: u32, initial: Duration) -> Duration {
    if retry == 0 {
        return Duration::from_millis(0);
    }

    let factor = 2u32.saturating_pow(retry - 1);
    initial.saturating_mul(factor)
}
