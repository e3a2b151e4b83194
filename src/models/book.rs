use serde::{Deserialize, Serialize};

// ============================================================================
// Recommendations
// ============================================================================

/// Request body for the recommendations endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    /// Free-text description of the reader's preferences
    pub prompt: String,
}

/// A book proposed by the model, before any cover lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateBook {
    pub title: String,
    pub author: String,
    pub reasoning: String,
}

/// Exact shape the model is instructed to answer with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRecommendationList {
    pub recommendations: Vec<CandidateBook>,
}

/// A recommendation returned to the client; `cover_url` is never empty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedBook {
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub reasoning: String,
}

impl ResolvedBook {
    pub fn from_candidate(candidate: CandidateBook, cover_url: String) -> Self {
        Self {
            title: candidate.title,
            author: candidate.author,
            cover_url,
            reasoning: candidate.reasoning,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationList {
    pub recommendations: Vec<ResolvedBook>,
}

// ============================================================================
// Direct search
// ============================================================================

/// Query string for the search endpoint; at least one field must be set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl SearchQuery {
    /// True when neither a title nor an author was supplied (blank counts as absent)
    pub fn is_empty(&self) -> bool {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
        blank(&self.title) && blank(&self.author)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultBook {
    pub title: Option<String>,
    pub author: String,
    pub isbn: Option<String>,
    pub cover_url: Option<String>,
    pub publish_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// Number of matches that survived filtering, before the page cut
    pub count: usize,
    pub results: Vec<SearchResultBook>,
}

/// Outcome of a direct search
///
/// A missing parameter is reported as a structured payload rather than an
/// error, so callers see the same `{"error": ...}` body the UI expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(SearchResults),
    MissingParameter { error: String },
}

// ============================================================================
// Single cover lookup
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CoverQuery {
    pub title: Option<String>,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverResponse {
    pub title: String,
    pub author: String,
    pub cover_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_is_empty() {
        assert!(SearchQuery::default().is_empty());
        assert!(SearchQuery {
            title: Some("  ".to_string()),
            author: Some(String::new()),
        }
        .is_empty());
        assert!(!SearchQuery {
            title: None,
            author: Some("Colleen Hoover".to_string()),
        }
        .is_empty());
    }

    #[test]
    fn test_resolved_book_from_candidate() {
        let candidate = CandidateBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            reasoning: "Desert politics".to_string(),
        };
        let resolved = ResolvedBook::from_candidate(
            candidate,
            "https://covers.openlibrary.org/b/id/1-L.jpg".to_string(),
        );
        assert_eq!(resolved.title, "Dune");
        assert_eq!(resolved.reasoning, "Desert politics");
        assert_eq!(resolved.cover_url, "https://covers.openlibrary.org/b/id/1-L.jpg");
    }

    #[test]
    fn test_search_outcome_serialization() {
        let missing = SearchOutcome::MissingParameter {
            error: "Please provide at least a title or author".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            serde_json::json!({ "error": "Please provide at least a title or author" })
        );

        let found = SearchOutcome::Found(SearchResults {
            count: 0,
            results: vec![],
        });
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({ "count": 0, "results": [] })
        );
    }
}
