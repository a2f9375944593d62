use chrono::Utc;
use tgdigest_ai::{Summarizer, TimeRangeResolver};
use tgdigest_common::command::DigestReply;

use crate::NewsService;
use crate::fetch::{HistorySource, collect_posts};

/// Shown in place of a digest when the summarization request fails.
pub(crate) const SUMMARY_FAILED: &str = "Не удалось обработать новости.";

/// One full pipeline pass: resolve the window, fetch matching posts,
/// summarize. Every stage failure degrades to a user-visible reply; nothing
/// escapes as an error.
pub(crate) async fn run_digest<A, H>(
    ai: &A,
    source: &H,
    channels: &[String],
    timezone: chrono_tz::Tz,
    query: &str,
) -> DigestReply
where
    A: TimeRangeResolver + Summarizer,
    H: HistorySource,
{
    let now = Utc::now().with_timezone(&timezone);

    let window = match ai.resolve(query, now).await {
        Ok(Some(window)) => window,
        Ok(None) => return DigestReply::WindowNotUnderstood,
        Err(error) => {
            tracing::error!(%error, "time range resolution failed");
            return DigestReply::WindowNotUnderstood;
        }
    };

    tracing::info!(
        start = %window.start(),
        end = %window.end(),
        "resolved time window"
    );

    let posts = match collect_posts(source, channels, &window).await {
        Ok(posts) => posts,
        Err(error) => {
            tracing::error!(%error, "history fetch failed");
            Vec::new()
        }
    };

    if posts.is_empty() {
        return DigestReply::NoPosts {
            start: window.start(),
            end: window.end(),
        };
    }

    let post_count = posts.len();

    let text = match ai.summarize(posts).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!(%error, "summarization failed");
            SUMMARY_FAILED.to_string()
        }
    };

    DigestReply::Summary {
        text,
        post_count,
        start: window.start(),
        end: window.end(),
    }
}

impl<A: TimeRangeResolver + Summarizer> NewsService<A> {
    pub(crate) async fn handle_digest(&self, query: &str) -> DigestReply {
        run_digest(&self.ai, self, &self.channels, self.timezone, query).await
    }
}
