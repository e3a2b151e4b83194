use crate::{
    error::AppResult,
    models::{CatalogDoc, CatalogQuery, SearchOutcome, SearchQuery, SearchResultBook, SearchResults},
    services::{covers::cover_url_for, providers::BookCatalog},
};

/// Raw catalog documents considered per search
const MAX_RAW_RESULTS: usize = 20;
/// Results returned per search
const MAX_RETURNED_RESULTS: usize = 10;

pub const MISSING_PARAMETER_MESSAGE: &str = "Please provide at least a title or author";

/// Searches the catalog directly, without involving the model
///
/// Unlike cover resolution, catalog failures are propagated: an empty result would be
/// indistinguishable from "no matches".
pub async fn search_books(
    catalog: &dyn BookCatalog,
    covers_url: &str,
    query: &SearchQuery,
) -> AppResult<SearchOutcome> {
    if query.is_empty() {
        return Ok(SearchOutcome::MissingParameter {
            error: MISSING_PARAMETER_MESSAGE.to_string(),
        });
    }

    let catalog_query = CatalogQuery::new(query.title.as_deref(), query.author.as_deref());
    let docs = catalog.search(&catalog_query).await?;

    let results = collect_results(docs, covers_url);

    tracing::info!(
        title = ?query.title,
        author = ?query.author,
        count = results.count,
        returned = results.results.len(),
        "Book search completed"
    );

    Ok(SearchOutcome::Found(results))
}

/// Maps the top raw documents and drops those with neither an ISBN nor a cover
fn collect_results(docs: Vec<CatalogDoc>, covers_url: &str) -> SearchResults {
    let mut books: Vec<SearchResultBook> = docs
        .into_iter()
        .take(MAX_RAW_RESULTS)
        .map(|doc| to_search_result(doc, covers_url))
        .filter(|book| book.isbn.is_some() || book.cover_url.is_some())
        .collect();

    let count = books.len();
    books.truncate(MAX_RETURNED_RESULTS);

    SearchResults {
        count,
        results: books,
    }
}

fn to_search_result(doc: CatalogDoc, covers_url: &str) -> SearchResultBook {
    let cover_url = cover_url_for(&doc, covers_url);
    let isbn = doc.first_isbn().map(String::from);
    let author = doc.primary_author().to_string();

    SearchResultBook {
        title: doc.title,
        author,
        isbn,
        cover_url,
        publish_year: doc.first_publish_year,
    }
}
