use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{SearchOutcome, SearchQuery},
    routes::AppState,
    services::book_search,
};

/// Handler for book search endpoint
///
/// A missing title and author is not an error response: the structured
/// `{"error": ...}` payload comes back with 200 and the catalog is not called.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchOutcome>> {
    let outcome =
        book_search::search_books(state.catalog.as_ref(), state.covers.covers_url(), &params)
            .await?;

    Ok(Json(outcome))
}
