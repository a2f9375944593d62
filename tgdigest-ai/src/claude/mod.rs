mod config;
mod models;

pub use config::Config;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::claude::models::{
    CompletionMessage, CompletionRequest, CompletionResponse, TimeRangeEnvelope,
};
use crate::{
    PostData, Summarizer, TgdigestAiError, TgdigestAiResult, TimeRangeResolver, TimeWindow,
};

const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Single-shot requests, no retry; a hung call must not stall the pipeline.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(90);

const RESOLVER_MAX_TOKENS: u32 = 200;
const SUMMARIZER_MAX_TOKENS: u32 = 2000;

/// Joined post text longer than this is hard-cut before prompting.
pub(crate) const MAX_PROMPT_CHARS: usize = 15_000;
pub(crate) const TRUNCATION_MARKER: &str = "\n...(текст обрезан)";

pub(crate) const NO_POSTS_SUMMARY: &str = "Новостей для анализа не найдено.";

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    resolver_model: String,
    summarizer_model: String,
}

impl ClaudeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            resolver_model: config.resolver_model.clone(),
            summarizer_model: config.summarizer_model.clone(),
        }
    }

    async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: String,
    ) -> TgdigestAiResult<String> {
        let request = CompletionRequest {
            model: model.to_string(),
            max_tokens,
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Check status before parsing
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Claude API error");
            return Err(TgdigestAiError::Api(format!("{status}: {body}")));
        }

        let response = response.json::<CompletionResponse>().await?;

        if let Some(error) = response.error {
            return Err(TgdigestAiError::Api(error.message));
        }

        response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| TgdigestAiError::Api("empty completion".to_string()))
    }
}

impl TimeRangeResolver for ClaudeClient {
    async fn resolve(&self, query: &str, now: DateTime<Tz>) -> TgdigestAiResult<Option<TimeWindow>> {
        let prompt = format!(
            r#"Текущее время: {now}.
Определи начальное и конечное время для поиска новостей на основе запроса пользователя.
Запрос: "{query}"
Верни ответ ТОЛЬКО в формате JSON с ключами "start_time" и "end_time" в формате ISO 8601 со смещением часового пояса.
Если определить период невозможно, верни {{"start_time": null, "end_time": null}}."#,
            now = now.to_rfc3339(),
        );

        let completion = self
            .complete(&self.resolver_model, RESOLVER_MAX_TOKENS, prompt)
            .await?;

        Ok(parse_time_window(&completion, now.timezone()))
    }
}

/// Pulls the JSON object out of a completion that may be wrapped in prose and
/// decodes it. Any schema violation resolves to `None` rather than an error.
pub(crate) fn parse_time_window(completion: &str, tz: Tz) -> Option<TimeWindow> {
    let open = completion.find('{')?;
    let close = completion.rfind('}')?;

    let envelope: TimeRangeEnvelope = serde_json::from_str(completion.get(open..=close)?).ok()?;

    let start = envelope.start_time?.with_timezone(&tz);
    let end = envelope.end_time?.with_timezone(&tz);

    TimeWindow::new(start, end)
}

impl Summarizer for ClaudeClient {
    async fn summarize(&self, posts: Vec<PostData>) -> TgdigestAiResult<String> {
        if posts.is_empty() {
            return Ok(NO_POSTS_SUMMARY.to_string());
        }

        let formatted: Vec<String> = posts
            .iter()
            .map(
                |PostData {
                     channel_handle,
                     text,
                     date,
                 }| {
                    format!(
                        "Из канала @{channel_handle} ({}):\n{text}",
                        date.format("%H:%M %d.%m")
                    )
                },
            )
            .collect();

        let blob = truncate_blob(formatted.join("\n\n---\n\n"));

        let prompt = format!(
            r#"Ты — ИИ-аналитик новостей. Сделай краткую и чёткую выжимку из предоставленных постов из Telegram-каналов.
Сгруппируй новости по темам. Убери всё маловажное.
Используй обычный текст без специальной разметки.
Не придумывай ничего, основывайся только на тексте ниже.

Текст для анализа:
{blob}"#
        );

        self.complete(&self.summarizer_model, SUMMARIZER_MAX_TOKENS, prompt)
            .await
    }
}

/// Hard cut at a character boundary, not content-aware.
pub(crate) fn truncate_blob(text: String) -> String {
    if text.chars().count() <= MAX_PROMPT_CHARS {
        return text;
    }

    let mut cut: String = text.chars().take(MAX_PROMPT_CHARS).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}
