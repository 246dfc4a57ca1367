//! Quantized backend: `mlx_lm.server` hosting the mlx-community 8-bit
//! models on Apple Silicon. The server speaks the OpenAI text-completions
//! shape, so the system instruction is folded into the raw prompt.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{TranslateError, TranslationRequest, Translator};
use crate::prompt;

pub struct MlxTranslator {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl MlxTranslator {
    pub fn new(base_url: &str, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        }
    }

    async fn request(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let settings = request.quality.settings();
        let user_prompt = prompt::build_prompt(&request.text, &request.context, &request.glossary);
        let body = CompletionRequest {
            model: request.quality.mlx_model().to_string(),
            prompt: format!("{}\n\n{}", prompt::SYSTEM_PROMPT, user_prompt),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/v1/completions", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TranslateError::Backend {
                backend: "mlx".to_string(),
                message: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| TranslateError::Backend {
                backend: "mlx".to_string(),
                message: "response contained no choices".to_string(),
            })
    }
}

impl Translator for MlxTranslator {
    fn name(&self) -> &str {
        "mlx"
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
                    backend: "mlx".to_string(),
                    message: format!("model server returned {}", response.status()),
                })
            }
        })
    }
}
