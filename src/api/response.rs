//! MediaWiki `action=query` response types
//!
//! Only the fields the gallery reads are modelled; everything else in the
//! body is ignored.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Top-level response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub query: Option<QueryBlock>,
}

/// The `query` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryBlock {
    #[serde(default)]
    pub pages: Option<Pages>,
}

/// One entry of the `pages` mapping
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub extract: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub source: Option<String>,
}

/// The `pages` mapping, keyed by page id, in the order the keys appear in
/// the response body.
#[derive(Debug, Clone, Default)]
pub struct Pages(Vec<(String, RawPage)>);

impl Pages {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawPage)> {
        self.0.iter().map(|(key, page)| (key.as_str(), page))
    }

    pub fn first(&self) -> Option<&RawPage> {
        self.0.first().map(|(_, page)| page)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Pages {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PagesVisitor;

        impl<'de> Visitor<'de> for PagesVisitor {
            type Value = Pages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of page id to page")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Pages, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pages = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, page)) = map.next_entry::<String, RawPage>()? {
                    pages.push((key, page));
                }
                Ok(Pages(pages))
            }
        }

        deserializer.deserialize_map(PagesVisitor)
    }
}

impl ApiResponse {
    /// The page mapping, if the body carried one
    pub fn pages(&self) -> Option<&Pages> {
        self.query.as_ref().and_then(|q| q.pages.as_ref())
    }

    pub fn into_pages(self) -> Option<Pages> {
        self.query.and_then(|q| q.pages)
    }
}
