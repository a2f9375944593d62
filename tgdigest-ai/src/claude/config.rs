fn default_resolver_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_summarizer_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

#[derive(serde::Deserialize)]
pub struct Config {
    pub api_key: String,

    /// Small model for time-range extraction.
    #[serde(default = "default_resolver_model")]
    pub resolver_model: String,

    #[serde(default = "default_summarizer_model")]
    pub summarizer_model: String,
}
