use std::future::Future;
use std::pin::Pin;

use super::{TranslateError, TranslationRequest, Translator};

/// Tries each backend in configured order; the first success wins.
///
/// A failed call falls through to the next backend rather than surfacing
/// immediately, so a dead model server degrades to the next tier instead of
/// failing the request. Only when every backend has failed does the request
/// error with [`TranslateError::Unavailable`].
pub struct FallbackTranslator {
    backends: Vec<Box<dyn Translator>>,
}

impl FallbackTranslator {
    pub fn new(backends: Vec<Box<dyn Translator>>) -> Self {
        Self { backends }
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    async fn try_all(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        for backend in &self.backends {
            match backend.translate(request).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(
                        backend = backend.name(),
                        error = %e,
                        "translation backend failed, falling through"
                    );
                }
            }
        }
        Err(TranslateError::Unavailable)
    }

    async fn first_ready(&self) -> Result<(), TranslateError> {
        for backend in &self.backends {
            if backend.check_ready().await.is_ok() {
                return Ok(());
            }
        }
        Err(TranslateError::Unavailable)
    }
}

impl Translator for FallbackTranslator {
    fn name(&self) -> &str {
        "fallback"
    }

    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>> {
        Box::pin(self.try_all(request))
    }

    fn check_ready<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<(), TranslateError>> + Send + 'a>> {
        Box::pin(self.first_ready())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quality;
    use crate::glossary::Glossary;
    use crate::translator::mock::MockTranslator;

    fn request() -> TranslationRequest {
        TranslationRequest::new("hello", Quality::Balanced, Glossary::new())
    }

    #[tokio::test]
    async fn first_working_backend_wins() {
        let chain = FallbackTranslator::new(vec![
            Box::new(MockTranslator::failing("primary")),
            Box::new(MockTranslator::with_prefix("secondary", "訳:")),
        ]);
        let result = chain.translate(&request()).await.unwrap();
        assert_eq!(result, "訳:hello");
    }

    #[tokio::test]
    async fn all_backends_failing_is_unavailable() {
        let chain = FallbackTranslator::new(vec![
            Box::new(MockTranslator::failing("a")),
            Box::new(MockTranslator::failing("b")),
        ]);
        let err = chain.translate(&request()).await.unwrap_err();
        assert!(matches!(err, TranslateError::Unavailable));
    }

    #[tokio::test]
    async fn healthy_backend_does_not_fall_through() {
        let primary = MockTranslator::with_prefix("primary", "一:");
        let chain = FallbackTranslator::new(vec![
            Box::new(primary),
            Box::new(MockTranslator::with_prefix("secondary", "二:")),
        ]);
        let result = chain.translate(&request()).await.unwrap();
        assert_eq!(result, "一:hello");
    }
}
