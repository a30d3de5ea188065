//! Transport mode facet
//!
//! Each mode biases the search towards one kind of freight transport by
//! appending a disjunctive keyword phrase to the user's text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Transport mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Mode {
    /// No transport bias
    #[default]
    All,
    /// Freight trains
    Rail,
    /// Cargo aircraft
    Air,
    /// Container ships and freighters
    Sea,
}

/// Unknown mode id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid mode '{0}'. Valid modes: all, rail, air, sea")]
pub struct ParseModeError(pub String);

impl Mode {
    /// All modes, in the order they are offered to the user
    pub const ALL: [Mode; 4] = [Mode::All, Mode::Rail, Mode::Air, Mode::Sea];

    /// Lowercase id used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Rail => "rail",
            Mode::Air => "air",
            Mode::Sea => "sea",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::All => "All",
            Mode::Rail => "Rail",
            Mode::Air => "Air",
            Mode::Sea => "Sea",
        }
    }

    /// Keyword phrase appended to the search text. Empty for `All`.
    pub fn phrase(&self) -> &'static str {
        match self {
            Mode::All => "",
            Mode::Rail => "freight train OR rail freight OR goods train",
            Mode::Air => "cargo plane OR air freight OR cargo aircraft",
            Mode::Sea => "shipping container OR cargo ship OR freighter",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

impl TryFrom<String> for Mode {
    type Error = ParseModeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default() {
        assert_eq!(Mode::default(), Mode::All);
    }

    #[test]
    fn test_all_has_no_phrase() {
        assert!(Mode::All.phrase().is_empty());
        for mode in [Mode::Rail, Mode::Air, Mode::Sea] {
            assert!(mode.phrase().contains(" OR "), "{mode} should be disjunctive");
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("rail".parse::<Mode>().unwrap(), Mode::Rail);
        assert_eq!("AIR".parse::<Mode>().unwrap(), Mode::Air);
        assert_eq!(" sea ".parse::<Mode>().unwrap(), Mode::Sea);
        assert_eq!("all".parse::<Mode>().unwrap(), Mode::All);
    }

    #[test]
    fn test_mode_from_str_unknown() {
        let err = "road".parse::<Mode>().unwrap_err();
        assert_eq!(err, ParseModeError("road".to_string()));
        assert!(err.to_string().contains("road"));
    }

    #[test]
    fn test_mode_display_roundtrips_through_parse() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&Mode::Sea).unwrap();
        assert_eq!(json, "\"sea\"");

        let deserialized: Mode = serde_json::from_str("\"rail\"").unwrap();
        assert_eq!(deserialized, Mode::Rail);
    }

    #[test]
    fn test_mode_deserialization_ignores_case() {
        let deserialized: Mode = serde_json::from_str("\"RAIL\"").unwrap();
        assert_eq!(deserialized, Mode::Rail);

        let deserialized: Mode = serde_json::from_str("\" Sea \"").unwrap();
        assert_eq!(deserialized, Mode::Sea);

        assert!(serde_json::from_str::<Mode>("\"road\"").is_err());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = Mode::ALL.iter().map(Mode::label).collect();
        assert_eq!(labels, vec!["All", "Rail", "Air", "Sea"]);
    }
}
