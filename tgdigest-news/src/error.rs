#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("Grammers invocation error: {0}")]
    Invocation(#[from] grammers_client::InvocationError),

    #[error("Channel not found: @{0}")]
    NotFound(String),

    #[error("Channel scan timed out")]
    ScanTimeout(#[from] tokio::time::error::Elapsed),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NewsError {
    /// Whether the failure poisons the connection rather than a single
    /// channel. RPC errors (access denied, unknown username) stay scoped to
    /// the channel being scanned.
    pub(crate) fn is_connection(&self) -> bool {
        match self {
            NewsError::Invocation(error) => {
                !matches!(error, grammers_client::InvocationError::Rpc(_))
            }
            _ => false,
        }
    }
}

pub type NewsResult<T> = Result<T, NewsError>;
