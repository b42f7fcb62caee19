//! Encouragement text for the message bubble.
//!
//! The backing model call is best-effort: any failure, or the absence of a
//! configured backend, collapses to fixed per-outcome strings. Nothing on
//! this path can surface an error to the learner.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::EncouragementError;

/// Upper bound on one backend call, so the message area never hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// Fixed fallbacks, one pair per failure mode.
const FALLBACK_CORRECT: &str = "太棒了！继续加油！";
const FALLBACK_WRONG: &str = "没关系，再试一次！";
const ERROR_CORRECT: &str = "你真聪明！🎈";
const ERROR_WRONG: &str = "别灰心，再来一次！🛡️";
const FALLBACK_EXPLAIN: &str = "记得把个位数加起来，如果超过10，就要进位哦！";
const ERROR_EXPLAIN: &str = "个位满十要向前一位进一哦！";

//
// ─── SOURCE TRAIT ──────────────────────────────────────────────────────────────
//

/// A text source for encouragement lines and the make-ten explanation.
///
/// Injected so the game loop can run against a deterministic stub in tests
/// instead of a live model call.
#[async_trait]
pub trait EncouragementSource: Send + Sync {
    /// A short line for a correct or incorrect answer.
    async fn line(&self, correct: bool) -> Result<String, EncouragementError>;

    /// Explains the make-ten trick for the given ones digits.
    async fn explain_make_ten(&self, ones1: u8, ones2: u8) -> Result<String, EncouragementError>;
}

//
// ─── LLM BACKEND ───────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl LlmConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("SUMS_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("SUMS_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("SUMS_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Chat-completions backed source.
#[derive(Clone)]
pub struct LlmEncouragement {
    client: Client,
    config: LlmConfig,
}

impl LlmEncouragement {
    #[must_use]
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        LlmConfig::from_env().map(Self::new)
    }

    async fn generate(&self, prompt: String) -> Result<String, EncouragementError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.8,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EncouragementError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(EncouragementError::EmptyResponse)?;

        Ok(content)
    }
}

#[async_trait]
impl EncouragementSource for LlmEncouragement {
    async fn line(&self, correct: bool) -> Result<String, EncouragementError> {
        let prompt = if correct {
            "Give a short, super enthusiastic, cute compliment in Chinese for a \
             7-year-old child who just solved a math problem correctly. Use emojis."
        } else {
            "Give a short, gentle, encouraging message in Chinese for a 7-year-old \
             child who made a mistake on a math problem. Tell them it's okay to \
             try again. Use emojis."
        };
        self.generate(prompt.to_string()).await
    }

    async fn explain_make_ten(&self, ones1: u8, ones2: u8) -> Result<String, EncouragementError> {
        let prompt = format!(
            "We are adding the ones digits {ones1} + {ones2}. The child is stuck. \
             Explain the \"Make 10\" (凑十法) idea in simple Chinese suitable for a \
             1st grader. Example logic: if adding 8 + 5, say \"8 needs 2 to become \
             10. Split 5 into 2 and 3...\" Keep it short (max 2 sentences) and very cute."
        );
        self.generate(prompt).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

//
// ─── NEVER-FAILING WRAPPER ─────────────────────────────────────────────────────
//

/// The service the game loop talks to. Absorbs every backend failure.
#[derive(Clone)]
pub struct EncouragementService {
    source: Option<Arc<dyn EncouragementSource>>,
}

impl EncouragementService {
    #[must_use]
    pub fn new(source: Option<Arc<dyn EncouragementSource>>) -> Self {
        Self { source }
    }

    /// Builds from `SUMS_AI_*` env vars; disabled when no key is set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            LlmEncouragement::from_env().map(|src| Arc::new(src) as Arc<dyn EncouragementSource>),
        )
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.source.is_some()
    }

    /// An encouragement line for the outcome. Never fails.
    pub async fn line(&self, correct: bool) -> String {
        let Some(source) = &self.source else {
            return fallback_line(correct).to_string();
        };
        match source.line(correct).await {
            Ok(text) => text,
            Err(_) => error_line(correct).to_string(),
        }
    }

    /// The make-ten explanation for the given ones digits. Never fails.
    pub async fn explain_make_ten(&self, ones1: u8, ones2: u8) -> String {
        let Some(source) = &self.source else {
            return FALLBACK_EXPLAIN.to_string();
        };
        match source.explain_make_ten(ones1, ones2).await {
            Ok(text) => text,
            Err(_) => ERROR_EXPLAIN.to_string(),
        }
    }
}

fn fallback_line(correct: bool) -> &'static str {
    if correct { FALLBACK_CORRECT } else { FALLBACK_WRONG }
}

fn error_line(correct: bool) -> &'static str {
    if correct { ERROR_CORRECT } else { ERROR_WRONG }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    #[async_trait]
    impl EncouragementSource for FailingSource {
        async fn line(&self, _correct: bool) -> Result<String, EncouragementError> {
            Err(EncouragementError::EmptyResponse)
        }

        async fn explain_make_ten(
            &self,
            _ones1: u8,
            _ones2: u8,
        ) -> Result<String, EncouragementError> {
            Err(EncouragementError::Disabled)
        }
    }

    struct CannedSource;

    #[async_trait]
    impl EncouragementSource for CannedSource {
        async fn line(&self, correct: bool) -> Result<String, EncouragementError> {
            Ok(if correct { "好样的" } else { "再试试" }.to_string())
        }

        async fn explain_make_ten(
            &self,
            ones1: u8,
            ones2: u8,
        ) -> Result<String, EncouragementError> {
            Ok(format!("{ones1}先凑十，再加{ones2}剩下的"))
        }
    }

    #[tokio::test]
    async fn missing_backend_uses_fixed_fallbacks() {
        let service = EncouragementService::new(None);
        assert!(!service.enabled());
        assert_eq!(service.line(true).await, FALLBACK_CORRECT);
        assert_eq!(service.line(false).await, FALLBACK_WRONG);
        assert_eq!(service.explain_make_ten(8, 5).await, FALLBACK_EXPLAIN);
    }

    #[tokio::test]
    async fn backend_failures_are_swallowed() {
        let service = EncouragementService::new(Some(Arc::new(FailingSource)));
        assert_eq!(service.line(true).await, ERROR_CORRECT);
        assert_eq!(service.line(false).await, ERROR_WRONG);
        assert_eq!(service.explain_make_ten(8, 5).await, ERROR_EXPLAIN);
    }

    #[tokio::test]
    async fn working_backend_passes_text_through() {
        let service = EncouragementService::new(Some(Arc::new(CannedSource)));
        assert_eq!(service.line(true).await, "好样的");
        assert_eq!(service.explain_make_ten(8, 5).await, "8先凑十，再加5剩下的");
    }
}
