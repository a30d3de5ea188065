//! freight-gallery: logistics image gallery over the MediaWiki search API
//!
//! Searches a wiki for pages about cargo and freight, keeps the ones with a
//! thumbnail, and opens a detail view with a larger image and longer text.
//!
//! # Modules
//!
//! - `query`: transport modes and search term composition
//! - `api`: MediaWiki HTTP client and response types
//! - `gallery`: display records and the search/detail pipeline
//! - `state`: immutable UI state, commands and the async driver
//! - `config`: configuration file and environment handling

pub mod api;
pub mod config;
pub mod gallery;
pub mod query;
pub mod state;

// Re-export commonly used types
pub use api::{GalleryError, WikiClient};
pub use config::AppConfig;
pub use gallery::{DetailRecord, SummaryRecord};
pub use query::{build_query, ComposedTerm, Mode};
pub use state::{Command, Gallery, UiState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_exists() {
        assert_eq!(NAME, "freight-gallery");
    }
}
