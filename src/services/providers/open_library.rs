/// Open Library search provider
///
/// Wraps `/search.json`. Only the request is made here; turning documents into cover
/// URLs or search results happens in the services that call it.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogDoc, CatalogQuery, CatalogSearchResponse},
    services::providers::BookCatalog,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const USER_AGENT: &str = concat!("book-library-api/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct OpenLibraryProvider {
    http_client: HttpClient,
    api_url: String,
}

impl OpenLibraryProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.api_url)
    }
}

#[async_trait::async_trait]
impl BookCatalog for OpenLibraryProvider {
    async fn search(&self, query: &CatalogQuery) -> AppResult<Vec<CatalogDoc>> {
        let response = self
            .http_client
            .get(self.search_url())
            .query(&query.params())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(provider = "open_library", "Catalog request timed out");
                }
                AppError::UpstreamUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(
                provider = "open_library",
                status = %status,
                "Catalog returned non-success status"
            );
            return Err(AppError::UpstreamUnavailable(format!(
                "Open Library returned status {}",
                status
            )));
        }

        let body: CatalogSearchResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Open Library response");
            AppError::UpstreamUnavailable(format!("Failed to parse Open Library response: {}", e))
        })?;

        tracing::debug!(
            title = ?query.title,
            author = ?query.author,
            docs = body.docs.len(),
            provider = "open_library",
            "Catalog search completed"
        );

        Ok(body.docs)
    }

    fn name(&self) -> &'static str {
        "open_library"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_strips_trailing_slash() {
        let provider =
            OpenLibraryProvider::new("https://openlibrary.org/".to_string(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(provider.search_url(), "https://openlibrary.org/search.json");
    }

    #[tokio::test]
    async fn test_silent_catalog_times_out_as_upstream_error() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let provider = OpenLibraryProvider::new(
            format!("http://{}", address),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = tokio_test::assert_err!(
            provider
                .search(&CatalogQuery::new(Some("Dune"), None))
                .await
        );
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));

        server.abort();
    }
}
