use std::sync::{Arc, Mutex};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use honyaku_core::config_file::Settings;
use honyaku_core::translator::{FallbackTranslator, build_translator};
use honyaku_core::{GlossaryStore, ProgressTracker, Quality};

/// The translator chain plus the quality tier it was built for. Swapped
/// wholesale when the quality changes; requests holding the old Arc keep it
/// alive until they finish.
pub struct Engine {
    pub quality: Quality,
    pub translator: FallbackTranslator,
}

impl Engine {
    pub fn build(settings: &Settings, quality: Quality) -> Self {
        Self {
            quality,
            translator: build_translator(settings),
        }
    }
}

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub settings: Settings,
    pub engine: RwLock<Arc<Engine>>,
    pub glossary: Arc<GlossaryStore>,
    pub progress: Arc<ProgressTracker>,
    /// Token of the page-translation run in flight; replaced per run so
    /// `/api/translate/cancel` always targets the latest one.
    pub active_run: Mutex<CancellationToken>,
}

impl AppState {
    pub fn new(settings: Settings, glossary: GlossaryStore) -> Self {
        let engine = Engine::build(&settings, settings.default_quality);
        Self {
            settings,
            engine: RwLock::new(Arc::new(engine)),
            glossary: Arc::new(glossary),
            progress: Arc::new(ProgressTracker::new()),
            active_run: Mutex::new(CancellationToken::new()),
        }
    }

    pub async fn engine(&self) -> Arc<Engine> {
        self.engine.read().await.clone()
    }

    /// Swap in a new engine for `quality` if it differs from the current one.
    pub async fn set_quality(&self, quality: Quality) {
        let mut guard = self.engine.write().await;
        if guard.quality != quality {
            tracing::info!(from = %guard.quality, to = %quality, "switching translation quality");
            *guard = Arc::new(Engine::build(&self.settings, quality));
        }
    }

    /// Start a new cancellable run, cancelling any previous one still live.
    pub fn begin_run(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut guard = self.active_run.lock().expect("active_run lock poisoned");
        guard.cancel();
        *guard = token.clone();
        token
    }

    pub fn cancel_active_run(&self) {
        self.progress.cancel();
        self.active_run
            .lock()
            .expect("active_run lock poisoned")
            .cancel();
    }
}
