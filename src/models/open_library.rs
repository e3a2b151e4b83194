use serde::Deserialize;

// ============================================================================
// Open Library Search API Types
// ============================================================================

/// Parameters sent to the catalog search endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl CatalogQuery {
    pub fn new(title: Option<&str>, author: Option<&str>) -> Self {
        Self {
            title: title.map(String::from),
            author: author.map(String::from),
        }
    }

    /// Query-string pairs, blank values omitted
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [("title", &self.title), ("author", &self.author)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v))
            })
            .collect()
    }
}

/// Raw response body of `/search.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSearchResponse {
    #[serde(default)]
    pub docs: Vec<CatalogDoc>,
}

/// A single search document; every field may be missing
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub isbn: Option<Vec<String>>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
}

impl CatalogDoc {
    /// First listed ISBN, as published (not normalized)
    pub fn first_isbn(&self) -> Option<&str> {
        self.isbn
            .as_ref()
            .and_then(|list| list.first())
            .map(String::as_str)
            .filter(|isbn| !isbn.is_empty())
    }

    pub fn primary_author(&self) -> &str {
        self.author_name
            .as_ref()
            .and_then(|names| names.first())
            .map(String::as_str)
            .unwrap_or("Unknown")
    }
}
