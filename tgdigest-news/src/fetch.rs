use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tgdigest_ai::{PostData, Summarizer, TimeRangeResolver, TimeWindow};

use crate::{NewsError, NewsResult, NewsService};

/// Hard cap on accepted posts per digest run, across all channels. Bounds the
/// summarizer payload and keeps latency flat regardless of channel activity.
pub(crate) const MAX_POSTS: usize = 10;

/// Bound on a single channel's history walk.
pub(crate) const SCAN_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

// ERID tokens are typically 8+ characters, alphanumeric
pub(crate) const AD_PATTERN_STR: &str = r"(?i:#реклама|(?:^|[\s\/\\?&])erid[\s:=]+[a-z0-9]{8,})";

static AD_PATTERN: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_ad_pattern() -> &'static Regex {
    AD_PATTERN.get_or_init(|| Regex::new(AD_PATTERN_STR).unwrap())
}

/// One channel message as the history walk sees it.
#[derive(Debug, Clone)]
pub(crate) struct RawMessage {
    pub date: DateTime<Utc>,
    pub text: String,
    pub is_reply: bool,
}

/// Newest-first walk over one channel's history.
pub(crate) trait HistoryIter {
    fn next(&mut self) -> impl Future<Output = NewsResult<Option<RawMessage>>>;
}

/// Message-history backend. Opens a newest-first iterator over a channel,
/// bounded above by `before`.
pub(crate) trait HistorySource {
    type Iter: HistoryIter;

    fn open(
        &self,
        handle: &str,
        before: DateTime<Utc>,
    ) -> impl Future<Output = NewsResult<Self::Iter>>;
}

/// Walk one channel backward from the window end, keeping messages that fall
/// inside the window, until `budget` posts are accepted. History is
/// chronologically monotonic, so the first message older than the window
/// start ends the walk without examining anything older.
pub(crate) async fn scan_channel<I: HistoryIter>(
    iter: &mut I,
    handle: &str,
    window: &TimeWindow,
    budget: usize,
) -> NewsResult<Vec<PostData>> {
    let tz = window.start().timezone();
    let mut posts = Vec::new();

    while posts.len() < budget {
        let Some(message) = iter.next().await? else {
            break;
        };

        let date = message.date.with_timezone(&tz);

        if date < window.start() {
            break;
        }

        // Offset imprecision can surface messages past the window end
        if date > window.end() {
            continue;
        }

        // Skip empty messages - probably some media files
        if message.text.is_empty() || message.is_reply {
            continue;
        }

        // Skip ads: messages with an ad hashtag or an Erid token
        if get_ad_pattern().is_match(&message.text) {
            tracing::debug!(channel = %handle, "skipping ad message");
            continue;
        }

        posts.push(PostData {
            channel_handle: handle.to_string(),
            text: message.text,
            date,
        });
    }

    Ok(posts)
}

/// Scan each channel in order until the global post cap is reached. Failures
/// scoped to one channel are logged and skipped; a connection-level failure
/// aborts the whole fetch.
pub(crate) async fn collect_posts<H: HistorySource>(
    source: &H,
    channels: &[String],
    window: &TimeWindow,
) -> NewsResult<Vec<PostData>> {
    let before = window.end().with_timezone(&Utc);
    let mut posts: Vec<PostData> = Vec::new();

    for handle in channels {
        if posts.len() >= MAX_POSTS {
            break;
        }

        let budget = MAX_POSTS - posts.len();

        let scanned = async {
            let mut iter = source.open(handle, before).await?;
            scan_channel(&mut iter, handle, window, budget).await
        };

        let result = tokio::time::timeout(SCAN_TIMEOUT, scanned)
            .await
            .map_err(NewsError::from)
            .and_then(|scanned| scanned);

        match result {
            Ok(mut found) => {
                tracing::info!(channel = %handle, count = found.len(), "scanned channel");
                posts.append(&mut found);
            }
            Err(error) if error.is_connection() => return Err(error),
            Err(error) => {
                tracing::warn!(%error, channel = %handle, "failed to fetch channel history");
            }
        }
    }

    Ok(posts)
}

pub(crate) struct ChannelHistoryIter(grammers_client::client::messages::MessageIter);

impl HistoryIter for ChannelHistoryIter {
    async fn next(&mut self) -> NewsResult<Option<RawMessage>> {
        let Some(message) = self.0.next().await? else {
            return Ok(None);
        };

        Ok(Some(RawMessage {
            date: message.date(),
            text: message.text().to_string(),
            is_reply: message.reply_to_message_id().is_some(),
        }))
    }
}

impl<A: TimeRangeResolver + Summarizer> HistorySource for NewsService<A> {
    type Iter = ChannelHistoryIter;

    async fn open(&self, handle: &str, before: DateTime<Utc>) -> NewsResult<ChannelHistoryIter> {
        let channel = self.resolve_channel(handle).await?;
        let iter = self.client.iter_messages(&channel).offset_date(before);

        Ok(ChannelHistoryIter(iter))
    }
}
