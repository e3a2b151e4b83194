/// External collaborators
///
/// The service talks to two upstreams: a generative model that proposes books and a
/// bibliographic catalog used for cover and metadata lookups. Each sits behind a trait
/// so handlers and tests can swap the concrete client.
use crate::{
    error::AppResult,
    models::{CandidateBook, CatalogDoc, CatalogQuery},
};

pub mod gemini;
pub mod open_library;

pub use gemini::GeminiProvider;
pub use open_library::OpenLibraryProvider;

/// Trait for recommendation models
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationModel: Send + Sync {
    /// Ask the model for books matching `prompt`
    ///
    /// Any transport, status, parse or validation failure is returned as
    /// `AppError::Generation`. No partial results.
    async fn recommend(&self, prompt: &str) -> AppResult<Vec<CandidateBook>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for bibliographic catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    /// Search the catalog by title and/or author
    ///
    /// Failures are reported as `AppError::UpstreamUnavailable`; whether to absorb
    /// or propagate them is up to the caller.
    async fn search(&self, query: &CatalogQuery) -> AppResult<Vec<CatalogDoc>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
