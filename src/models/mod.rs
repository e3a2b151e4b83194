mod book;
mod open_library;

pub use book::{
    AgentRecommendationList, BookRequest, CandidateBook, CoverQuery, CoverResponse,
    RecommendationList, ResolvedBook, SearchOutcome, SearchQuery, SearchResultBook,
    SearchResults,
};
pub use open_library::{CatalogDoc, CatalogQuery, CatalogSearchResponse};
