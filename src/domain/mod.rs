//! Domain types for the watch log with strong typing.
//!
//! The enums here form closed tag sets. Every label or style lookup is an
//! exhaustive `match`, so an unknown value can only appear at the parsing
//! boundary, where it becomes a [`ParseTagError`].

pub mod progress;
pub mod status;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use progress::progress;
pub use status::infer_status;

/// Unique identifier for a watch record, assigned by the store.
///
/// # Examples
///
/// ```rust
/// use watchlog::domain::RecordId;
///
/// let id = RecordId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i32);

impl RecordId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "RecordId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for i32 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl FromStr for RecordId {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i32>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ParseTagError::new("record id", s)),
        }
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Text that does not name a member of one of the closed tag sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseTagError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    pub const ALL: [Self; 2] = [Self::Movie, Self::Series];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Series => "SERIES",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "TV Series",
        }
    }
}

/// How much the viewer liked it, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Skip,
    Timepass,
    GoForIt,
    LisanAlGaib,
}

impl Rating {
    pub const ALL: [Self; 4] = [Self::Skip, Self::Timepass, Self::GoForIt, Self::LisanAlGaib];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::Timepass => "TIMEPASS",
            Self::GoForIt => "GO_FOR_IT",
            Self::LisanAlGaib => "LISAN_AL_GAIB",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::Timepass => "TIMEPASS",
            Self::GoForIt => "GO FOR IT",
            Self::LisanAlGaib => "LISAN AL GAIB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    Watching,
    #[default]
    Completed,
    Dropped,
}

impl WatchStatus {
    pub const ALL: [Self; 3] = [Self::Watching, Self::Completed, Self::Dropped];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "WATCHING",
            Self::Completed => "COMPLETED",
            Self::Dropped => "DROPPED",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    /// Terminal glyph shown next to the label.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Watching => "▶",
            Self::Completed => "✓",
            Self::Dropped => "✗",
        }
    }
}

/// Accepts the wire tag in any case, with `-` or ` ` in place of `_`.
fn normalize_tag(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

macro_rules! tag_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ParseTagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let tag = normalize_tag(s);
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == tag)
                    .ok_or_else(|| ParseTagError::new($kind, s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_from_str!(MediaType, "media type");
tag_from_str!(Rating, "rating");
tag_from_str!(WatchStatus, "status");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_conversions() {
        let id = RecordId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(RecordId::from(42), id);
        assert_eq!("42".parse::<RecordId>().unwrap(), id);
        assert!("0".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn tags_parse_loosely() {
        assert_eq!("go-for-it".parse::<Rating>().unwrap(), Rating::GoForIt);
        assert_eq!("Lisan Al Gaib".parse::<Rating>().unwrap(), Rating::LisanAlGaib);
        assert_eq!("series".parse::<MediaType>().unwrap(), MediaType::Series);
        assert_eq!("DROPPED".parse::<WatchStatus>().unwrap(), WatchStatus::Dropped);
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let err = "MASTERPIECE".parse::<Rating>().unwrap_err();
        assert_eq!(err.kind, "rating");
        assert_eq!(err.to_string(), "unknown rating: 'MASTERPIECE'");
    }

    #[test]
    fn serde_uses_wire_tags() {
        assert_eq!(
            serde_json::to_string(&Rating::LisanAlGaib).unwrap(),
            "\"LISAN_AL_GAIB\""
        );
        let status: WatchStatus = serde_json::from_str("\"WATCHING\"").unwrap();
        assert_eq!(status, WatchStatus::Watching);
        assert!(serde_json::from_str::<MediaType>("\"ANIME\"").is_err());
    }

    #[test]
    fn status_defaults_to_completed() {
        assert_eq!(WatchStatus::default(), WatchStatus::Completed);
    }
}
