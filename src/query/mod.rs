//! Query builder
//!
//! Combines the user's free text with the phrase for the selected transport
//! mode into the term sent as `gsrsearch`.

mod mode;

pub use mode::{Mode, ParseModeError};

use std::fmt;

/// Term searched when neither the user nor the mode supplies one
pub const DEFAULT_TERM: &str = "cargo freight";

/// Final search string sent to the API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComposedTerm(String);

impl ComposedTerm {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComposedTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build the search term for `free_text` under `mode`.
///
/// The free text is passed through verbatim so that search operators
/// (`intitle:`, quotes, `-word`) keep working. Only emptiness is checked.
pub fn build_query(free_text: &str, mode: Mode) -> ComposedTerm {
    let composed = [free_text, mode.phrase()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if composed.is_empty() {
        ComposedTerm(DEFAULT_TERM.to_string())
    } else {
        ComposedTerm(composed)
    }
}
