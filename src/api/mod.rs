//! MediaWiki API access
//!
//! HTTP client, request parameters and response types.

pub mod client;
pub mod response;

pub use client::{GalleryError, PageId, WikiClient};
pub use response::{ApiResponse, Pages, RawPage};
