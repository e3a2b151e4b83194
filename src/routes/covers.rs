use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CoverQuery, CoverResponse},
    routes::AppState,
};

/// Handler for single cover lookup endpoint
pub async fn cover(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoverQuery>,
) -> AppResult<Json<CoverResponse>> {
    let title = params
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("title is required".to_string()))?;

    let cover_url = state.covers.lookup_cover(&title, &params.author).await;

    Ok(Json(CoverResponse {
        title,
        author: params.author,
        cover_url,
    }))
}
