use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tgdigest_ai::{
    PostData, Summarizer, TgdigestAiError, TgdigestAiResult, TimeRangeResolver, TimeWindow,
};

use crate::fetch::{HistoryIter, HistorySource, RawMessage};
use crate::{NewsError, NewsResult};

pub(crate) const TZ: Tz = chrono_tz::Asia::Jerusalem;

pub(crate) fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 5, hour, minute, 0).unwrap()
}

pub(crate) fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(start.with_timezone(&TZ), end.with_timezone(&TZ)).unwrap()
}

pub(crate) fn post(date: DateTime<Utc>, text: &str) -> RawMessage {
    RawMessage {
        date,
        text: text.to_string(),
        is_reply: false,
    }
}

pub(crate) fn reply(date: DateTime<Utc>, text: &str) -> RawMessage {
    RawMessage {
        date,
        text: text.to_string(),
        is_reply: true,
    }
}

pub(crate) fn handles(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub(crate) struct FakeIter {
    messages: std::vec::IntoIter<RawMessage>,
    polls: Arc<AtomicUsize>,
}

impl FakeIter {
    pub(crate) fn new(messages: Vec<RawMessage>, polls: Arc<AtomicUsize>) -> Self {
        Self {
            messages: messages.into_iter(),
            polls,
        }
    }
}

impl HistoryIter for FakeIter {
    async fn next(&mut self) -> NewsResult<Option<RawMessage>> {
        self.polls.fetch_add(1, Ordering::Relaxed);
        Ok(self.messages.next())
    }
}

/// In-memory history backend; message lists are newest-first, the way
/// Telegram serves history.
pub(crate) struct FakeHistory {
    channels: HashMap<String, Vec<RawMessage>>,
    polls: Arc<AtomicUsize>,
    opens: Arc<AtomicUsize>,
    /// Handle whose open fails with a connection-level error.
    pub(crate) broken: Option<String>,
}

impl FakeHistory {
    pub(crate) fn new(channels: Vec<(&str, Vec<RawMessage>)>) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|(handle, messages)| (handle.to_string(), messages))
                .collect(),
            polls: Arc::new(AtomicUsize::new(0)),
            opens: Arc::new(AtomicUsize::new(0)),
            broken: None,
        }
    }

    pub(crate) fn polls(&self) -> usize {
        self.polls.load(Ordering::Relaxed)
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl HistorySource for FakeHistory {
    type Iter = FakeIter;

    async fn open(&self, handle: &str, _before: DateTime<Utc>) -> NewsResult<FakeIter> {
        self.opens.fetch_add(1, Ordering::Relaxed);

        if self.broken.as_deref() == Some(handle) {
            return Err(NewsError::Invocation(
                grammers_client::InvocationError::Dropped,
            ));
        }

        let messages = self
            .channels
            .get(handle)
            .cloned()
            .ok_or_else(|| NewsError::NotFound(handle.to_string()))?;

        Ok(FakeIter::new(messages, Arc::clone(&self.polls)))
    }
}

pub(crate) struct FakeAi {
    window: Option<TimeWindow>,
    resolve_fails: bool,
    summary: Option<String>,
    summarize_calls: Arc<AtomicUsize>,
}

impl FakeAi {
    pub(crate) fn resolving(window: TimeWindow, summary: &str) -> Self {
        Self {
            window: Some(window),
            resolve_fails: false,
            summary: Some(summary.to_string()),
            summarize_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn unresolved() -> Self {
        Self {
            window: None,
            resolve_fails: false,
            summary: None,
            summarize_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn failing_resolver() -> Self {
        Self {
            resolve_fails: true,
            ..Self::unresolved()
        }
    }

    pub(crate) fn failing_summarizer(window: TimeWindow) -> Self {
        Self {
            window: Some(window),
            ..Self::unresolved()
        }
    }

    pub(crate) fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::Relaxed)
    }
}

impl TimeRangeResolver for FakeAi {
    async fn resolve(
        &self,
        _query: &str,
        _now: DateTime<Tz>,
    ) -> TgdigestAiResult<Option<TimeWindow>> {
        if self.resolve_fails {
            return Err(TgdigestAiError::Api("resolver unavailable".to_string()));
        }

        Ok(self.window)
    }
}

impl Summarizer for FakeAi {
    async fn summarize(&self, _posts: Vec<PostData>) -> TgdigestAiResult<String> {
        self.summarize_calls.fetch_add(1, Ordering::Relaxed);

        match &self.summary {
            Some(text) => Ok(text.clone()),
            None => Err(TgdigestAiError::Api("summarizer unavailable".to_string())),
        }
    }
}
