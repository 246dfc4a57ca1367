//! OS-native fallback: the macOS Shortcuts runner. A user-installed
//! shortcut wraps the system Translate action; this backend shells out to
//! `shortcuts run <name>` with the text in a temp file and reads the
//! translation from stdout. No model server required, but no glossary or
//! quality control either — the glossary only reaches the LLM backends.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;

use super::{TranslateError, TranslationRequest, Translator};

pub struct MacosTranslator {
    shortcuts_bin: String,
    shortcut_name: String,
}

impl MacosTranslator {
    pub fn new(shortcuts_bin: &str, shortcut_name: &str) -> Self {
        Self {
            shortcuts_bin: shortcuts_bin.to_string(),
            shortcut_name: shortcut_name.to_string(),
        }
    }

    async fn run(&self, text: &str) -> Result<String, TranslateError> {
        let mut input = tempfile::NamedTempFile::new()?;
        std::io::Write::write_all(&mut input, text.as_bytes())?;

        let output = Command::new(&self.shortcuts_bin)
            .arg("run")
            .arg(&self.shortcut_name)
            .arg("-i")
            .arg(input.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(TranslateError::Backend {
                backend: "macos".to_string(),
                message: format!(
                    "shortcut '{}' exited with {}: {}",
                    self.shortcut_name,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Translator for MacosTranslator {
    fn name(&self) -> &str {
        "macos"
    }

    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, TranslateError>> + Send + 'a>> {
        Box::pin(self.run(&request.text))
    }

    fn check_ready<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<(), TranslateError>> + Send + 'a>> {
        Box::pin(async move {
            let output = Command::new(&self.shortcuts_bin)
                .arg("list")
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .output()
                .await?;

            if !output.status.success() {
                return Err(TranslateError::Backend {
                    backend: "macos".to_string(),
                    message: "shortcuts runner not available".to_string(),
                });
            }

            let listing = String::from_utf8_lossy(&output.stdout);
            if listing.lines().any(|l| l.trim() == self.shortcut_name) {
                Ok(())
            } else {
                Err(TranslateError::Backend {
                    backend: "macos".to_string(),
                    message: format!("shortcut '{}' is not installed", self.shortcut_name),
                })
            }
        })
    }
}
