// HTTP routes configuration

use super::content::{gallery_handler, project_detail_handler, projects_handler};
use super::handlers::{chat_handler, health_handler, metrics_handler, translate_handler};
use super::middleware::{cors_layer, request_id_layers, track_metrics};
use crate::config::AppConfig;
use crate::content::ProjectStore;
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
    pub projects: Arc<ProjectStore>,
}

pub fn create_router(
    config: AppConfig,
    gemini_client: GeminiClient,
    projects: ProjectStore,
) -> Result<Router> {
    let body_limit = config.server.body_limit_bytes;
    let compress = config.performance.enable_compression;

    let state = AppState {
        config,
        gemini_client: Arc::new(gemini_client),
        projects: Arc::new(projects),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/projects", get(projects_handler))
        .route("/api/projects/:id", get(project_detail_handler))
        .route("/api/gallery", get(gallery_handler))
        .layer(middleware::from_fn(track_metrics))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    let app = if compress {
        app.layer(tower_http::compression::CompressionLayer::new())
    } else {
        app
    };

    Ok(app)
}
