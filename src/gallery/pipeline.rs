//! Result pipeline
//!
//! List search and detail lookup on top of [`WikiClient`].

use super::records::{normalize_pages, DetailRecord, ResultSet, SummaryRecord};
use crate::api::{GalleryError, WikiClient};
use crate::query::ComposedTerm;

/// Search for `term` and normalize the matches.
///
/// A body without a page mapping, or with an empty one, is
/// [`GalleryError::EmptyResult`]. Failures are logged and returned once.
pub async fn search(client: &WikiClient, term: &ComposedTerm) -> Result<ResultSet, GalleryError> {
    let response = client.search_pages(term).await.inspect_err(|e| {
        tracing::error!("search for {:?} failed: {}", term.as_str(), e);
    })?;

    let pages = match response.pages() {
        Some(pages) if !pages.is_empty() => pages,
        _ => {
            tracing::info!("no pages for {:?}", term.as_str());
            return Err(GalleryError::EmptyResult);
        }
    };

    let records = normalize_pages(pages);
    tracing::info!(
        "search {:?}: {} of {} pages have thumbnails",
        term.as_str(),
        records.len(),
        pages.len()
    );
    Ok(records)
}

/// Fetch the detail view for `record`. Never fails: on any error the
/// summary's own fields are used.
pub async fn open_detail(client: &WikiClient, record: &SummaryRecord) -> DetailRecord {
    match client.fetch_page(record.id).await {
        Ok(response) => DetailRecord::merge(record, response.pages().and_then(|p| p.first())),
        Err(e) => {
            tracing::warn!("detail for page {} failed, using summary: {}", record.id, e);
            DetailRecord::from_summary(record)
        }
    }
}
