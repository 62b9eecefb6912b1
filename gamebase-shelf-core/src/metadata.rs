//! The typed record produced from one info file.

use serde::{Serialize, Serializer};

/// Placeholder used for most fields that were not present.
pub const UNKNOWN: &str = "Unknown";
/// Secondary genre used when the genre has no `" - "` split.
pub const OTHER: &str = "Other";
/// Language used when the info file has no `Language:` line.
pub const NO_TEXT: &str = "(No Text)";

/// A field that always yields a value: either the parsed text or a fixed default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Defaulted {
    Parsed(String),
    Default(&'static str),
}

impl Defaulted {
    /// Wrap an optional parsed value, falling back to `default` when absent.
    pub fn or_default(value: Option<String>, default: &'static str) -> Self {
        match value {
            Some(v) => Self::Parsed(v),
            None => Self::Default(default),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Parsed(v) => v,
            Self::Default(d) => d,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

impl std::fmt::Display for Defaulted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

impl Serialize for Defaulted {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

/// Metadata extracted from a `VERSION.NFO` file.
///
/// `Defaulted` fields always carry text by the time parsing finishes.
/// `Option` fields are left empty when absent; the path resolver substitutes
/// [`UNKNOWN`] for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameMetadata {
    /// Game title as written in the info file (not sanitized)
    pub name: String,
    pub primary_genre: String,
    pub secondary_genre: Defaulted,
    pub language: Defaulted,
    /// Four-character year, possibly with `?` placeholders (e.g. `198?`)
    pub published_year: Defaulted,
    pub publisher: Defaulted,
    pub players: Defaulted,
    pub control: Defaulted,
    /// Contents of the `Pal/NTSC:` line
    pub video_standard: Defaulted,
    pub unique_id: Option<String>,
    pub developer: Option<String>,
    pub coding: Option<String>,
    pub graphics: Option<String>,
    pub music: Option<String>,
    pub comment: Option<String>,
}
