//! Gallery records and the result pipeline

mod pipeline;
mod records;

pub use pipeline::{open_detail, search};
pub use records::{normalize_pages, DetailRecord, ResultSet, SummaryRecord};
