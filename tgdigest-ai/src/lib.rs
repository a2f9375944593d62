pub mod claude;
mod error;

#[cfg(test)]
mod tests;

pub use error::*;

use chrono::DateTime;
use chrono_tz::Tz;

/// One channel post handed to the summarizer, already in the reference timezone.
#[derive(Debug, Clone)]
pub struct PostData {
    pub channel_handle: String,
    pub text: String,
    pub date: DateTime<Tz>,
}

/// Absolute time range resolved from a free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl TimeWindow {
    /// Rejects reversed ranges instead of silently swapping the bounds.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }
}

pub trait TimeRangeResolver {
    fn resolve(
        &self,
        query: &str,
        now: DateTime<Tz>,
    ) -> impl Future<Output = TgdigestAiResult<Option<TimeWindow>>>;
}

pub trait Summarizer {
    fn summarize(&self, posts: Vec<PostData>) -> impl Future<Output = TgdigestAiResult<String>>;
}
