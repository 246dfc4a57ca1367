use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod error;
mod handlers;
mod models;
mod state;
mod upload;

use honyaku_core::config_file::{Settings, load_config};
use honyaku_core::translator::Translator;
use honyaku_core::GlossaryStore;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_file(load_config());
    tracing::info!(
        backends = ?settings.backend_order,
        quality = %settings.default_quality,
        "starting PDF translation service"
    );

    let glossary = GlossaryStore::open(&settings.glossary_path)?;
    let addr = SocketAddr::new(settings.host.parse()?, settings.port);
    let state = Arc::new(AppState::new(settings, glossary));

    // Probe the backend chain once at startup so a misconfigured deployment
    // is visible in the logs immediately, not on the first request.
    {
        let engine = state.engine().await;
        match engine.translator.check_ready().await {
            Ok(()) => tracing::info!("translation backend ready"),
            Err(e) => tracing::warn!(error = %e, "no translation backend ready yet"),
        }
    }

    // Allow large PDF uploads (100MB)
    let body_limit = axum::extract::DefaultBodyLimit::max(100 * 1024 * 1024);

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::health::root))
        .route("/health", axum::routing::get(handlers::health::health))
        .route(
            "/api/pdf/upload",
            axum::routing::post(handlers::pdf::upload_pdf),
        )
        .route(
            "/api/translate",
            axum::routing::post(handlers::translate::translate),
        )
        .route(
            "/api/translate/pages",
            axum::routing::post(handlers::translate::translate_pages),
        )
        .route(
            "/api/translate/batch",
            axum::routing::post(handlers::translate::translate_batch),
        )
        .route(
            "/api/translate/progress",
            axum::routing::get(handlers::translate::progress),
        )
        .route(
            "/api/translate/cancel",
            axum::routing::post(handlers::translate::cancel),
        )
        .route(
            "/api/download/translation",
            axum::routing::post(handlers::download::download_translation),
        )
        .route(
            "/api/quality/info",
            axum::routing::get(handlers::quality::quality_info),
        )
        .route(
            "/api/quality/set",
            axum::routing::post(handlers::quality::set_quality),
        )
        .route(
            "/api/glossary",
            axum::routing::get(handlers::glossary::get_glossary),
        )
        .route(
            "/api/glossary/add",
            axum::routing::post(handlers::glossary::add_glossary_term),
        )
        .route(
            "/api/glossary/update",
            axum::routing::post(handlers::glossary::update_glossary),
        )
        .layer(CorsLayer::permissive())
        .layer(body_limit)
        .with_state(state);

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
