#[derive(Debug, thiserror::Error)]
pub enum TgdigestAiError {
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Claude API error: {0}")]
    Api(String),
}

pub type TgdigestAiResult<T> = Result<T, TgdigestAiError>;
