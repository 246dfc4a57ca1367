use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Flat mapping of English term to Japanese term.
pub type Glossary = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum GlossaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse glossary file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed glossary, loaded and rewritten wholesale on every mutation.
///
/// The store is the only state that outlives a request. Writes go through a
/// sibling temp file and a rename so a crash mid-write never truncates the
/// existing file.
pub struct GlossaryStore {
    path: PathBuf,
    terms: Mutex<Glossary>,
}

impl GlossaryStore {
    /// Open the store at `path`. A missing file yields an empty glossary;
    /// the file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GlossaryError> {
        let path = path.into();
        let terms = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Glossary::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(path = %path.display(), terms = terms.len(), "glossary loaded");
        Ok(Self {
            path,
            terms: Mutex::new(terms),
        })
    }

    /// Snapshot of the current glossary.
    pub fn get(&self) -> Glossary {
        self.terms.lock().expect("glossary lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.terms.lock().expect("glossary lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the whole glossary and persist it.
    pub fn replace(&self, glossary: Glossary) -> Result<(), GlossaryError> {
        let mut terms = self.terms.lock().expect("glossary lock poisoned");
        *terms = glossary;
        self.persist(&terms)
    }

    /// Add or overwrite a single term and persist the whole file.
    pub fn add(&self, english: &str, japanese: &str) -> Result<(), GlossaryError> {
        let mut terms = self.terms.lock().expect("glossary lock poisoned");
        terms.insert(english.to_string(), japanese.to_string());
        self.persist(&terms)
    }

    fn persist(&self, terms: &Glossary) -> Result<(), GlossaryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = temp_sibling(&self.path);
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(serde_json::to_string_pretty(terms)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(terms = terms.len(), "glossary persisted");
        Ok(())
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "glossary.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
