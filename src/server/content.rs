// Read-only content handlers (projects and gallery)

use super::routes::AppState;
use crate::error::{GatewayError, Result};
use crate::models::content::{GalleryItem, Project};
use axum::extract::{Path, State};
use axum::Json;

pub async fn projects_handler(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    Ok(Json(state.projects.published()?))
}

pub async fn project_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    match state.projects.find(&id)? {
        Some(project) => Ok(Json(project)),
        None => Err(GatewayError::NotFound(id)),
    }
}

pub async fn gallery_handler(State(state): State<AppState>) -> Result<Json<Vec<GalleryItem>>> {
    Ok(Json(state.projects.gallery()?))
}
