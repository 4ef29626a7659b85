//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::FromRef,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::services::{
    BrowserPool, ChromeEngine, InMemoryStore, PdfEngine, PdfExporter, PresetCatalog,
    ResumeRenderer, TemplateCatalog,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub catalog: Arc<TemplateCatalog>,
    pub presets: Arc<PresetCatalog>,
    pub exporter: Arc<PdfExporter>,
}

impl FromRef<AppState> for Arc<InMemoryStore> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.store)
    }
}

impl FromRef<AppState> for Arc<TemplateCatalog> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.catalog)
    }
}

impl FromRef<AppState> for Arc<PresetCatalog> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.presets)
    }
}

impl FromRef<AppState> for Arc<PdfExporter> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.exporter)
    }
}

/// Create application state from an asset loader, printing PDFs with the
/// headless browser named by the config.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    let engine = Arc::new(ChromeEngine::from_config(&config.pdf));
    create_app_state_with(asset_loader, config, engine)
}

/// Create application state with an explicit PDF engine.
pub fn create_app_state_with_engine(
    asset_loader: Arc<AssetLoader>,
    engine: Arc<dyn PdfEngine>,
) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    create_app_state_with(asset_loader, config, engine)
}

fn create_app_state_with(
    asset_loader: Arc<AssetLoader>,
    config: AppConfig,
    engine: Arc<dyn PdfEngine>,
) -> anyhow::Result<AppState> {
    let catalog = Arc::new(TemplateCatalog::from_config(&config));
    let presets = Arc::new(PresetCatalog::from_config(&config));
    let renderer = Arc::new(
        ResumeRenderer::new(&asset_loader)
            .map_err(|e| anyhow::anyhow!("Failed to load resume templates: {e}"))?,
    );
    let exporter = Arc::new(PdfExporter::new(
        renderer,
        Arc::clone(&catalog),
        BrowserPool::from_config(&config.pdf),
        engine,
    ));

    tracing::info!(
        templates = catalog.all().len(),
        default_template = %catalog.default_template().id,
        pool_size = exporter.pool().size(),
        engine = exporter.engine().name(),
        "Application state ready"
    );

    Ok(AppState {
        store: Arc::new(InMemoryStore::new()),
        catalog,
        presets,
        exporter,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// API responses are never cached; the editor always wants fresh data.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Résumé records
        .route(
            "/api/resumes",
            get(api::handle_list_resumes::<InMemoryStore>)
                .post(api::handle_create_resume::<InMemoryStore>),
        )
        .route(
            "/api/resumes/:id",
            get(api::handle_get_resume::<InMemoryStore>)
                .patch(api::handle_update_resume::<InMemoryStore>)
                .delete(api::handle_delete_resume::<InMemoryStore>),
        )
        // Per-template style overrides
        .route(
            "/api/resumes/:id/styles/:template_id",
            get(api::handle_get_style::<InMemoryStore>)
                .post(api::handle_save_style::<InMemoryStore>)
                .delete(api::handle_delete_style::<InMemoryStore>),
        )
        // Catalog
        .route("/api/templates", get(api::handle_list_templates))
        .route("/api/templates/:id", get(api::handle_get_template))
        .route("/api/presets", get(api::handle_list_presets))
        // Export
        .route("/api/generate-pdf", post(api::handle_generate_pdf))
        .route("/api/preview", post(api::handle_preview))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
