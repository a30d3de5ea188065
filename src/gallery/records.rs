//! Display records and response normalization

use serde::{Deserialize, Serialize};

use crate::api::{PageId, Pages, RawPage};

/// Grid entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: PageId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub excerpt: String,
}

/// Detail view entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: PageId,
    pub title: String,
    pub large_image_url: Option<String>,
    pub long_excerpt: String,
}

/// Ordered grid contents, replaced wholesale on every search
pub type ResultSet = Vec<SummaryRecord>;

impl SummaryRecord {
    pub fn new(
        id: PageId,
        title: impl Into<String>,
        thumbnail_url: Option<String>,
        excerpt: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            thumbnail_url,
            excerpt: excerpt.into(),
        }
    }

    /// Normalize one entry of the `pages` mapping. Entries without a page
    /// id (in the body or as the key) cannot be opened later and are
    /// skipped.
    pub fn from_page(key: &str, page: &RawPage) -> Option<Self> {
        let id = page.pageid.or_else(|| key.parse().ok())?;
        Some(Self {
            id,
            title: page.title.clone().unwrap_or_default(),
            thumbnail_url: thumbnail_of(page),
            excerpt: non_empty(page.extract.as_deref()).unwrap_or_default(),
        })
    }
}

impl DetailRecord {
    /// Detail built only from the summary, used when the lookup fails
    pub fn from_summary(record: &SummaryRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            large_image_url: record.thumbnail_url.clone(),
            long_excerpt: record.excerpt.clone(),
        }
    }

    /// Merge a detail page over the summary. Each field falls back to the
    /// summary on its own.
    pub fn merge(record: &SummaryRecord, page: Option<&RawPage>) -> Self {
        let large_image_url = page
            .and_then(thumbnail_of)
            .or_else(|| record.thumbnail_url.clone());
        let long_excerpt = page
            .and_then(|p| non_empty(p.extract.as_deref()))
            .unwrap_or_else(|| record.excerpt.clone());

        Self {
            id: record.id,
            title: record.title.clone(),
            large_image_url,
            long_excerpt,
        }
    }
}

/// Normalize a list response into grid records, dropping pages without a
/// thumbnail. Order follows the response body.
pub fn normalize_pages(pages: &Pages) -> ResultSet {
    pages
        .iter()
        .filter_map(|(key, page)| SummaryRecord::from_page(key, page))
        .filter(|record| record.thumbnail_url.is_some())
        .collect()
}

fn thumbnail_of(page: &RawPage) -> Option<String> {
    page.thumbnail
        .as_ref()
        .and_then(|t| non_empty(t.source.as_deref()))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResponse;

    fn pages(body: &str) -> Pages {
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        response.into_pages().unwrap()
    }

    #[test]
    fn test_drops_pages_without_thumbnail() {
        let pages = pages(
            r#"{"query":{"pages":{
                "1":{"pageid":1,"title":"Freight train","thumbnail":{"source":"a.jpg"},"extract":"A train."},
                "2":{"pageid":2,"title":"Rail freight","extract":"No image."},
                "3":{"pageid":3,"title":"Goods wagon","thumbnail":{"source":"c.jpg"}}
            }}}"#,
        );
        let records = normalize_pages(&pages);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].excerpt, "A train.");
        assert_eq!(records[1].id, 3);
        assert_eq!(records[1].excerpt, "");
    }

    #[test]
    fn test_empty_thumbnail_source_counts_as_absent() {
        let pages = pages(r#"{"query":{"pages":{"7":{"pageid":7,"title":"T","thumbnail":{"source":""}}}}}"#);
        assert!(normalize_pages(&pages).is_empty());
    }

    #[test]
    fn test_thumbnail_without_source_drops_only_that_page() {
        let pages = pages(
            r#"{"query":{"pages":{
                "1":{"pageid":1,"title":"A","thumbnail":{"source":"a.jpg"}},
                "2":{"pageid":2,"title":"B","thumbnail":{"width":0}}
            }}}"#,
        );
        let records = normalize_pages(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_merge_thumbnail_without_source_keeps_extract() {
        let summary = SummaryRecord::new(1, "X", Some("a.jpg".into()), "e");
        let pages = pages(r#"{"query":{"pages":{"1":{"pageid":1,"thumbnail":{},"extract":"Long text."}}}}"#);
        let detail = DetailRecord::merge(&summary, pages.first());
        assert_eq!(detail.large_image_url.as_deref(), Some("a.jpg"));
        assert_eq!(detail.long_excerpt, "Long text.");
    }

    #[test]
    fn test_id_falls_back_to_key() {
        let pages = pages(r#"{"query":{"pages":{"31":{"title":"T","thumbnail":{"source":"t.png"}}}}}"#);
        let records = normalize_pages(&pages);
        assert_eq!(records[0].id, 31);
    }

    #[test]
    fn test_detail_from_summary() {
        let summary = SummaryRecord::new(1, "X", Some("a.jpg".into()), "e");
        let detail = DetailRecord::from_summary(&summary);
        assert_eq!(
            detail,
            DetailRecord {
                id: 1,
                title: "X".into(),
                large_image_url: Some("a.jpg".into()),
                long_excerpt: "e".into(),
            }
        );
    }

    #[test]
    fn test_merge_field_level_fallback() {
        let summary = SummaryRecord::new(1, "X", Some("a.jpg".into()), "e");
        let page = RawPage {
            pageid: Some(1),
            title: Some("Ignored".into()),
            thumbnail: Some(crate::api::response::Thumbnail {
                source: Some("big.jpg".into()),
            }),
            extract: None,
        };
        let detail = DetailRecord::merge(&summary, Some(&page));
        assert_eq!(detail.title, "X");
        assert_eq!(detail.large_image_url.as_deref(), Some("big.jpg"));
        assert_eq!(detail.long_excerpt, "e");
    }

    #[test]
    fn test_merge_without_page() {
        let summary = SummaryRecord::new(9, "Y", Some("y.jpg".into()), "short");
        assert_eq!(
            DetailRecord::merge(&summary, None),
            DetailRecord::from_summary(&summary)
        );
    }
}
