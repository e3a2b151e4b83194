use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{BookRequest, RecommendationList},
    routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<BookRequest>,
) -> AppResult<Json<RecommendationList>> {
    tracing::info!(
        request_id = %request_id,
        prompt_len = request.prompt.len(),
        "Processing recommendation request"
    );

    let response = recommendations::get_recommendations(
        state.model.clone(),
        state.covers.clone(),
        &request.prompt,
        state.recommendation_count,
    )
    .await
    .inspect_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Recommendation request failed")
    })?;

    tracing::info!(
        request_id = %request_id,
        recommendations = response.recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}
