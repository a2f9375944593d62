use chrono::DateTime;
use chrono_tz::Tz;
use tokio::sync::oneshot;

/// Work sent from the bot frontend to the news service.
#[derive(Debug)]
pub enum NewsCommand {
    Digest {
        query: String,
        response: oneshot::Sender<DigestReply>,
    },

    Shutdown,
}

/// Outcome of one digest pipeline run. Stage failures degrade into one of
/// these; nothing else crosses back to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum DigestReply {
    /// No time range could be extracted from the query.
    WindowNotUnderstood,

    /// The window resolved, but no posts matched it.
    NoPosts {
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    },

    Summary {
        text: String,
        post_count: usize,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    },
}
