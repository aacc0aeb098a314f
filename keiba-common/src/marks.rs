//! Prediction marks
//!
//! A mark is one of five categorical symbols. "No mark" is `None` wherever
//! a mark is optional; there is no sixth variant for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// User-chosen annotation on a horse's entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionMark {
    /// ◎ favourite pick
    #[serde(rename = "◎")]
    Honmei,
    /// ○ main rival
    #[serde(rename = "○")]
    Taikou,
    /// ▲ dark horse
    #[serde(rename = "▲")]
    Tanana,
    /// △ place candidate
    #[serde(rename = "△")]
    Renka,
    /// × ruled out
    #[serde(rename = "×")]
    Hoshi,
}

impl PredictionMark {
    /// Selector order
    pub const ALL: [PredictionMark; 5] = [
        PredictionMark::Honmei,
        PredictionMark::Taikou,
        PredictionMark::Tanana,
        PredictionMark::Renka,
        PredictionMark::Hoshi,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            PredictionMark::Honmei => "◎",
            PredictionMark::Taikou => "○",
            PredictionMark::Tanana => "▲",
            PredictionMark::Renka => "△",
            PredictionMark::Hoshi => "×",
        }
    }

    /// Romanized name, also accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            PredictionMark::Honmei => "honmei",
            PredictionMark::Taikou => "taikou",
            PredictionMark::Tanana => "tanana",
            PredictionMark::Renka => "renka",
            PredictionMark::Hoshi => "hoshi",
        }
    }
}

/// Display form of an optional mark; unmarked entries show "-"
pub fn display_mark(mark: Option<PredictionMark>) -> &'static str {
    mark.map(|m| m.symbol()).unwrap_or("-")
}

impl fmt::Display for PredictionMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PredictionMark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PredictionMark::ALL
            .into_iter()
            .find(|m| m.symbol() == s || m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown prediction mark: {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&PredictionMark::Honmei).unwrap(), "\"◎\"");
        let mark: PredictionMark = serde_json::from_str("\"×\"").unwrap();
        assert_eq!(mark, PredictionMark::Hoshi);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        assert!(serde_json::from_str::<PredictionMark>("\"☆\"").is_err());
        assert!("☆".parse::<PredictionMark>().is_err());
    }

    #[test]
    fn test_parse_symbol_or_name() {
        assert_eq!("▲".parse::<PredictionMark>().unwrap(), PredictionMark::Tanana);
        assert_eq!("Renka".parse::<PredictionMark>().unwrap(), PredictionMark::Renka);
        assert_eq!(" taikou ".parse::<PredictionMark>().unwrap(), PredictionMark::Taikou);
    }

    #[test]
    fn test_display_mark() {
        assert_eq!(display_mark(None), "-");
        assert_eq!(display_mark(Some(PredictionMark::Renka)), "△");
    }
}
