#[derive(serde::Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<CompletionMessage>,
}

#[derive(serde::Serialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

#[derive(serde::Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(serde::Deserialize)]
pub struct ContentBlock {
    pub text: String,
}

#[derive(serde::Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// The JSON object the resolver model is instructed to emit. Both fields stay
/// optional so an "indeterminate" answer decodes instead of erroring.
#[derive(serde::Deserialize)]
pub struct TimeRangeEnvelope {
    pub start_time: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub end_time: Option<chrono::DateTime<chrono::FixedOffset>>,
}
