//! Full-precision backend: an OpenAI-compatible chat-completions server
//! (vLLM, text-generation-inference, or `transformers serve`) hosting the
//! Qwen instruct models.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{TranslateError, TranslationRequest, Translator};
use crate::prompt;

pub struct TransformersTranslator {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl TransformersTranslator {
    pub fn new(base_url: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }

    async fn request(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let settings = request.quality.settings();
        let body = ChatRequest {
            model: request.quality.transformers_model().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt::build_prompt(&request.text, &request.context, &request.glossary),
                },
            ],
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TranslateError::Backend {
                backend: "transformers".to_string(),
                message: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TranslateError::Backend {
                backend: "transformers".to_string(),
                message: "response contained no choices".to_string(),
            })
    }
}

impl Translator for TransformersTranslator {
    fn name(&self) -> &str {
        "transformers"
    }

    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>> {
        Box::pin(self.request(request))
    }

    fn check_ready<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<(), TranslateError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .get(format!("{}/v1/models", self.base_url))
                .timeout(Duration::from_secs(5))
                .send()
                .await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(TranslateError::Backend {
                    backend: "transformers".to_string(),
                    message: format!("model server returned {}", response.status()),
                })
            }
        })
    }
}
