use std::num::NonZeroU32;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;

/// Per-email limiter for login attempts.
///
/// Every attempt counts, successful or not. Keys are normalised to lower case
/// so `Owner@Example.com` and `owner@example.com` share a bucket.
pub struct LoginLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl LoginLimiter {
    pub fn new(attempts_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
        }
    }

    /// Consume one attempt for `email`.
    pub fn check(&self, email: &str) -> Result<(), AppError> {
        let key = email.trim().to_lowercase();
        match self.limiter.check_key(&key) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                // Round up so clients never retry a moment too early.
                let retry_after = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
                tracing::warn!(email = %key, retry_after, "Login rate limit hit");
                Err(AppError::RateLimited {
                    retry_after: retry_after.max(1),
                })
            }
        }
    }

    /// Drop idle buckets.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}
