//! In-memory translator for tests. Not wired into any production path.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{TranslateError, TranslationRequest, Translator};

/// A deterministic translator: prefixes the input, counts calls, and can be
/// told to fail every request.
pub struct MockTranslator {
    name: String,
    prefix: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn with_prefix(name: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Translator for MockTranslator {
    fn name(&self) -> &str {
        &self.name
    }

    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranslateError::Backend {
                    backend: self.name.clone(),
                    message: "mock failure".to_string(),
                });
            }
            Ok(format!("{}{}", self.prefix, request.text))
        })
    }

    fn check_ready<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<(), TranslateError>> + Send + 'a>> {
        Box::pin(async move {
            if self.fail {
                Err(TranslateError::Backend {
                    backend: self.name.clone(),
                    message: "mock failure".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }
}
