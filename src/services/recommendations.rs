use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CandidateBook, RecommendationList, ResolvedBook},
    services::{
        covers::{CoverResolver, COVER_ERROR_URL},
        providers::RecommendationModel,
    },
};

/// Generates book recommendations for a free-text prompt
///
/// The model proposes candidates, then every candidate gets a cover lookup. The
/// returned list has the same length and order as the model's answer; the count is
/// passed through even when it differs from what the model was asked for.
pub async fn get_recommendations(
    model: Arc<dyn RecommendationModel>,
    covers: CoverResolver,
    prompt: &str,
    expected_count: usize,
) -> AppResult<RecommendationList> {
    if prompt.trim().is_empty() {
        return Err(AppError::InvalidInput("Prompt cannot be empty".to_string()));
    }

    tracing::info!(
        prompt_len = prompt.len(),
        provider = model.name(),
        "Requesting recommendations"
    );

    let candidates = model.recommend(prompt).await?;

    if candidates.len() != expected_count {
        tracing::warn!(
            expected = expected_count,
            received = candidates.len(),
            "Model returned an unexpected number of recommendations"
        );
    }

    let recommendations = resolve_covers(covers, candidates).await;

    Ok(RecommendationList { recommendations })
}

/// Resolves a cover for every candidate concurrently
///
/// One task per candidate, all launched before any is awaited. Handles are awaited
/// in input order, so results pair with their candidate by index regardless of which
/// lookup finishes first.
pub async fn resolve_covers(
    covers: CoverResolver,
    candidates: Vec<CandidateBook>,
) -> Vec<ResolvedBook> {
    let tasks: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            let resolver = covers.clone();
            let title = candidate.title.clone();
            let author = candidate.author.clone();
            tokio::spawn(async move { resolver.lookup_cover(&title, &author).await })
        })
        .collect();

    let mut resolved = Vec::with_capacity(candidates.len());

    for (candidate, task) in candidates.into_iter().zip(tasks) {
        let cover_url = match task.await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, title = %candidate.title, "Cover task join error");
                COVER_ERROR_URL.to_string()
            }
        };
        resolved.push(ResolvedBook::from_candidate(candidate, cover_url));
    }

    tracing::info!(resolved = resolved.len(), "Covers resolved");

    resolved
}
