use std::sync::Arc;

use crate::{
    models::{CatalogDoc, CatalogQuery},
    services::providers::BookCatalog,
};

/// Returned when the catalog answered but had nothing usable
pub const COVER_NOT_FOUND_URL: &str =
    "https://placehold.co/200x300/e0e0e0/000000?text=Cover+Not+Found";

/// Returned when the catalog lookup itself failed
pub const COVER_ERROR_URL: &str = "https://placehold.co/200x300/e0e0e0/000000?text=Error+Loading";

/// Strips hyphens and spaces so the ISBN can be embedded in a CDN path
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// Derives a large cover URL from a catalog document
///
/// ISBN wins over the internal cover id; `None` when the document has neither.
/// A cover id of 0 means "no cover".
pub fn cover_url_for(doc: &CatalogDoc, covers_url: &str) -> Option<String> {
    if let Some(isbn) = doc.first_isbn() {
        return Some(format!("{}/b/isbn/{}-L.jpg", covers_url, normalize_isbn(isbn)));
    }

    doc.cover_i
        .filter(|cover_id| *cover_id != 0)
        .map(|cover_id| format!("{}/b/id/{}-L.jpg", covers_url, cover_id))
}

/// Resolves cover URLs against the catalog, never failing outward
#[derive(Clone)]
pub struct CoverResolver {
    catalog: Arc<dyn BookCatalog>,
    covers_url: String,
}

impl CoverResolver {
    pub fn new(catalog: Arc<dyn BookCatalog>, covers_url: String) -> Self {
        Self {
            catalog,
            covers_url: covers_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn covers_url(&self) -> &str {
        &self.covers_url
    }

    /// Looks up a cover for `(title, author)`
    ///
    /// Only the first matching document is considered. Lookup failures map to
    /// [`COVER_ERROR_URL`], an empty or coverless match to [`COVER_NOT_FOUND_URL`].
    pub async fn lookup_cover(&self, title: &str, author: &str) -> String {
        let query = CatalogQuery::new(Some(title), Some(author));

        let docs = match self.catalog.search(&query).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    author = %author,
                    provider = self.catalog.name(),
                    error = %e,
                    "Cover lookup failed"
                );
                return COVER_ERROR_URL.to_string();
            }
        };

        match docs.first().and_then(|doc| cover_url_for(doc, &self.covers_url)) {
            Some(url) => url,
            None => {
                tracing::debug!(title = %title, author = %author, "No cover found");
                COVER_NOT_FOUND_URL.to_string()
            }
        }
    }
}
