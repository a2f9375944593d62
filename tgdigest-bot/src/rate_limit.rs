use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};

pub type KeyedRateLimiter = RateLimiter<i64, DashMapStateStore<i64>, DefaultClock>;

/// Per-user limits: a digest run costs two LLM calls and a channel sweep, so
/// it is throttled much harder than plain commands.
pub struct RateLimiters {
    pub commands: KeyedRateLimiter,
    pub digest: KeyedRateLimiter,
}

impl RateLimiters {
    pub fn new() -> Self {
        Self {
            commands: RateLimiter::keyed(
                Quota::with_period(Duration::from_secs(1))
                    .unwrap()
                    .allow_burst(NonZeroU32::new(1).unwrap()),
            ),
            digest: RateLimiter::keyed(
                Quota::with_period(Duration::from_secs(60))
                    .unwrap()
                    .allow_burst(NonZeroU32::new(1).unwrap()),
            ),
        }
    }
}
