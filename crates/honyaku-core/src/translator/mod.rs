//! Translation backend trait and implementations.
//!
//! Three backends cover the deployment spectrum: a full-precision
//! transformers server, a quantized MLX server for Apple Silicon, and the
//! macOS Shortcuts translator as a model-free last resort. They are chained
//! by [`FallbackTranslator`] in the order the config lists them.

pub mod fallback;
pub mod macos;
pub mod mlx;
pub mod mock;
pub mod transformers;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::glossary::Glossary;
use crate::quality::Quality;

pub use fallback::FallbackTranslator;
pub use macos::MacosTranslator;
pub use mlx::MlxTranslator;
pub use transformers::TransformersTranslator;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
    #[error("no translation backend available")]
    Unavailable,
    #[error("translation cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single translation request: the text, optional context, the quality
/// tier (which selects the model), and the glossary overrides to embed in
/// the prompt.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub context: String,
    pub quality: Quality,
    pub glossary: Glossary,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, quality: Quality, glossary: Glossary) -> Self {
        Self {
            text: text.into(),
            context: String::new(),
            quality,
            glossary,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// A translation backend. Implementations return the raw model output;
/// post-processing (think-tag stripping, encoding fixes) happens in the
/// pipeline so it is applied uniformly.
pub trait Translator: Send + Sync {
    /// The canonical name of this backend (e.g., "transformers", "mlx").
    fn name(&self) -> &str;

    /// Translate one text English→Japanese.
    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>>;

    /// Probe whether the backend can serve requests at all.
    fn check_ready<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<(), TranslateError>> + Send + 'a>>;
}

/// Backend selection, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Transformers,
    Mlx,
    Macos,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transformers" => Ok(BackendKind::Transformers),
            "mlx" => Ok(BackendKind::Mlx),
            "macos" => Ok(BackendKind::Macos),
            other => Err(format!(
                "unknown backend '{other}', expected 'transformers', 'mlx', or 'macos'"
            )),
        }
    }
}

/// Build the fallback chain from resolved settings.
pub fn build_translator(settings: &crate::config_file::Settings) -> FallbackTranslator {
    let client = reqwest::Client::new();
    let timeout = std::time::Duration::from_secs(settings.request_timeout_secs);

    let backends: Vec<Box<dyn Translator>> = settings
        .backend_order
        .iter()
        .map(|kind| -> Box<dyn Translator> {
            match kind {
                BackendKind::Transformers => Box::new(TransformersTranslator::new(
                    &settings.transformers_url,
                    client.clone(),
                    timeout,
                )),
                BackendKind::Mlx => {
                    Box::new(MlxTranslator::new(&settings.mlx_url, client.clone(), timeout))
                }
                BackendKind::Macos => Box::new(MacosTranslator::new(
                    &settings.shortcuts_bin,
                    &settings.macos_shortcut,
                )),
            }
        })
        .collect();

    FallbackTranslator::new(backends)
}
