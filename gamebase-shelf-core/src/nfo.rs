//! Field extraction from GameBase `VERSION.NFO` text.
//!
//! Info files are loosely structured: a `GAME INFO` section holds one
//! `Label: value` line per field, usually followed by a free-form
//! `GAME HISTORY` section. Extraction is driven by [`FIELD_TABLE`]; one
//! generic routine handles every label.

use std::collections::HashMap;

use crate::encoding::decode_info_text;
use crate::error::ParseError;
use crate::metadata::{Defaulted, GameMetadata, NO_TEXT, UNKNOWN};
use crate::split::{split_genre, split_published};

/// Marker that starts the section fields are read from.
pub const SECTION_START: &str = "GAME INFO";
/// Marker that ends it. Optional; without it the section runs to the end.
pub const SECTION_END: &str = "GAME HISTORY";

/// The fields an info file may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    Name,
    Genre,
    Language,
    Published,
    Players,
    Control,
    PalNtsc,
    UniqueId,
    Developer,
    Coding,
    Graphics,
    Music,
    Comment,
}

/// What happens when a field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence fails the whole extraction
    Required,
    /// Absence substitutes this value
    Default(&'static str),
    /// Absence leaves the field empty
    Optional,
}

/// How a label is located within the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchoring {
    /// Only at the start of a line (after optional indentation)
    LineStart,
    /// Line start first, then anywhere in the section
    PreferLineStart,
}

/// One row of the extraction table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: InfoField,
    /// Label including the trailing colon, e.g. `"Pal/NTSC:"`
    pub label: &'static str,
    pub presence: Presence,
    pub anchoring: Anchoring,
    /// Whether indented continuation lines belong to the value
    pub multiline: bool,
}

const fn spec(
    field: InfoField,
    label: &'static str,
    presence: Presence,
    anchoring: Anchoring,
    multiline: bool,
) -> FieldSpec {
    FieldSpec {
        field,
        label,
        presence,
        anchoring,
        multiline,
    }
}

/// Every recognized label. `Published` has its defaults applied by
/// [`split_published`] since it yields two fields.
pub const FIELD_TABLE: &[FieldSpec] = &[
    spec(InfoField::Name, "Name:", Presence::Required, Anchoring::LineStart, false),
    spec(InfoField::Genre, "Genre:", Presence::Required, Anchoring::PreferLineStart, true),
    spec(InfoField::Language, "Language:", Presence::Default(NO_TEXT), Anchoring::PreferLineStart, false),
    spec(InfoField::Published, "Published:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Players, "Players:", Presence::Default(UNKNOWN), Anchoring::PreferLineStart, false),
    spec(InfoField::Control, "Control:", Presence::Default(UNKNOWN), Anchoring::PreferLineStart, false),
    spec(InfoField::PalNtsc, "Pal/NTSC:", Presence::Default(UNKNOWN), Anchoring::PreferLineStart, false),
    spec(InfoField::UniqueId, "Unique-ID:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Developer, "Developer:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Coding, "Coding:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Graphics, "Graphics:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Music, "Music:", Presence::Optional, Anchoring::PreferLineStart, false),
    spec(InfoField::Comment, "Comment:", Presence::Optional, Anchoring::PreferLineStart, false),
];

/// Return the text between [`SECTION_START`] and [`SECTION_END`].
///
/// Without a start marker the whole text is the section.
pub fn info_section(text: &str) -> &str {
    let Some(start) = text.find(SECTION_START) else {
        return text;
    };
    let rest = &text[start + SECTION_START.len()..];
    match rest.find(SECTION_END) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn starts_with_known_label(line: &str) -> bool {
    let trimmed = line.trim_start();
    FIELD_TABLE.iter().any(|s| trimmed.starts_with(s.label))
}

/// Find a label at the start of a line; returns the line index and the
/// trimmed remainder. Lines with an empty value are skipped.
fn find_anchored<'a>(lines: &[&'a str], label: &str) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(i, line)| {
        let value = line.trim_start().strip_prefix(label)?.trim();
        (!value.is_empty()).then_some((i, value))
    })
}

fn find_unanchored<'a>(lines: &[&'a str], label: &str) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(i, line)| {
        line.match_indices(label)
            .map(|(pos, _)| line[pos + label.len()..].trim())
            .find(|value| !value.is_empty())
            .map(|value| (i, value))
    })
}

/// Extract a single field from the section lines.
fn extract_field(lines: &[&str], spec: &FieldSpec) -> Option<String> {
    let found = match spec.anchoring {
        Anchoring::LineStart => find_anchored(lines, spec.label),
        Anchoring::PreferLineStart => {
            find_anchored(lines, spec.label).or_else(|| find_unanchored(lines, spec.label))
        }
    };
    let (index, first) = found?;

    if !spec.multiline {
        return Some(first.to_string());
    }

    // Continuation lines are indented deeper than the label line and are not
    // themselves another field.
    let base_indent = indent_width(lines[index]);
    let mut joined = first.to_string();
    for line in &lines[index + 1..] {
        if line.trim().is_empty()
            || indent_width(line) <= base_indent
            || starts_with_known_label(line)
        {
            break;
        }
        joined.push(' ');
        joined.push_str(line.trim());
    }
    Some(joined.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Run the table over `text`, returning the raw value of every field found.
pub fn extract_fields(text: &str) -> HashMap<InfoField, String> {
    let lines: Vec<&str> = info_section(text).lines().collect();
    FIELD_TABLE
        .iter()
        .filter_map(|spec| extract_field(&lines, spec).map(|v| (spec.field, v)))
        .collect()
}

/// Parse decoded info-file text into [`GameMetadata`].
///
/// Fails with [`ParseError::MissingRequiredField`] when there is no `Name:`
/// line and [`ParseError::MissingGenre`] when there is no `Genre:` field.
/// Everything else falls back to defaults.
pub fn parse_info_text(text: &str) -> Result<GameMetadata, ParseError> {
    let mut raw = extract_fields(text);

    let name = raw
        .remove(&InfoField::Name)
        .ok_or(ParseError::MissingRequiredField { field: "Name" })?;
    let genre = raw.remove(&InfoField::Genre).ok_or(ParseError::MissingGenre)?;
    let (primary_genre, secondary_genre) = split_genre(&genre);
    let published = split_published(raw.get(&InfoField::Published).map(String::as_str));

    let mut defaulted = |field: InfoField| {
        let default = FIELD_TABLE
            .iter()
            .find(|s| s.field == field)
            .and_then(|s| match s.presence {
                Presence::Default(d) => Some(d),
                _ => None,
            })
            .unwrap_or(UNKNOWN);
        Defaulted::or_default(raw.remove(&field), default)
    };

    let language = defaulted(InfoField::Language);
    let players = defaulted(InfoField::Players);
    let control = defaulted(InfoField::Control);
    let video_standard = defaulted(InfoField::PalNtsc);

    Ok(GameMetadata {
        name,
        primary_genre,
        secondary_genre,
        language,
        published_year: published.year,
        publisher: published.publisher,
        players,
        control,
        video_standard,
        unique_id: raw.remove(&InfoField::UniqueId),
        developer: raw.remove(&InfoField::Developer),
        coding: raw.remove(&InfoField::Coding),
        graphics: raw.remove(&InfoField::Graphics),
        music: raw.remove(&InfoField::Music),
        comment: raw.remove(&InfoField::Comment),
    })
}

/// Decode raw info-file bytes and parse them.
pub fn parse_info_bytes(bytes: &[u8]) -> Result<GameMetadata, ParseError> {
    let text = decode_info_text(bytes)?;
    parse_info_text(&text)
}

#[cfg(test)]
#[path = "tests/nfo_tests.rs"]
mod tests;
