//! Folder templates such as `{primary_genre}/{secondary_genre}/{language}/{name}`.
//!
//! A template is parsed once, up front, so an unknown placeholder is reported
//! before any archive is touched and regardless of what metadata is later
//! expanded into it. `{{` and `}}` produce literal braces.

use std::collections::HashMap;

use crate::error::TemplateError;

/// Template used when the operator does not supply one.
pub const DEFAULT_TEMPLATE: &str = "{primary_genre}/{secondary_genre}/{language}/{name}";

/// A placeholder that may appear in a folder template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateField {
    Name,
    PrimaryGenre,
    SecondaryGenre,
    Language,
    PublishedYear,
    Publisher,
    Developer,
    Players,
    Control,
    PalNtsc,
    UniqueId,
    Coding,
    Graphics,
    Music,
    Comment,
}

const ALL_FIELDS: &[TemplateField] = &[
    TemplateField::Name,
    TemplateField::PrimaryGenre,
    TemplateField::SecondaryGenre,
    TemplateField::Language,
    TemplateField::PublishedYear,
    TemplateField::Publisher,
    TemplateField::Developer,
    TemplateField::Players,
    TemplateField::Control,
    TemplateField::PalNtsc,
    TemplateField::UniqueId,
    TemplateField::Coding,
    TemplateField::Graphics,
    TemplateField::Music,
    TemplateField::Comment,
];

impl TemplateField {
    /// The name written between braces in a template.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PrimaryGenre => "primary_genre",
            Self::SecondaryGenre => "secondary_genre",
            Self::Language => "language",
            Self::PublishedYear => "published_year",
            Self::Publisher => "publisher",
            Self::Developer => "developer",
            Self::Players => "players",
            Self::Control => "control",
            Self::PalNtsc => "pal_ntsc",
            Self::UniqueId => "unique_id",
            Self::Coding => "coding",
            Self::Graphics => "graphics",
            Self::Music => "music",
            Self::Comment => "comment",
        }
    }

    /// Short description for help output.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Name => "Game name",
            Self::PrimaryGenre => "Genre before ' - '",
            Self::SecondaryGenre => "Genre after ' - ' (Other if none)",
            Self::Language => "Language ((No Text) if none)",
            Self::PublishedYear => "Release year, '?' shown as 'x'",
            Self::Publisher => "Publisher",
            Self::Developer => "Developer",
            Self::Players => "Number of players",
            Self::Control => "Control method",
            Self::PalNtsc => "Video standard (PAL/NTSC)",
            Self::UniqueId => "GameBase unique ID",
            Self::Coding => "Programmer",
            Self::Graphics => "Graphics artist",
            Self::Music => "Composer",
            Self::Comment => "Comment line",
        }
    }

    /// All 15 fields, in documentation order.
    pub fn all() -> &'static [TemplateField] {
        ALL_FIELDS
    }

    /// Every placeholder name, sorted alphabetically.
    pub fn valid_names() -> Vec<String> {
        let mut names: Vec<String> = ALL_FIELDS
            .iter()
            .map(|f| f.placeholder().to_string())
            .collect();
        names.sort();
        names
    }
}

impl std::fmt::Display for TemplateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.placeholder())
    }
}

impl std::str::FromStr for TemplateField {
    type Err = TemplateError;

    /// Parse a bare placeholder name (without braces). Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FIELDS
            .iter()
            .copied()
            .find(|f| f.placeholder() == s)
            .ok_or_else(|| TemplateError::UnknownField {
                field: s.to_string(),
                valid: TemplateField::valid_names(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field(TemplateField),
}

/// A parsed folder template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    tokens: Vec<Token>,
}

impl PathTemplate {
    /// Parse a template string, validating every placeholder.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::malformed(template, "unclosed '{'"));
                    }
                    if name.is_empty() {
                        return Err(TemplateError::malformed(template, "empty placeholder '{}'"));
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(Token::Field(name.parse()?));
                }
                '}' => {
                    return Err(TemplateError::malformed(template, "single '}' encountered"));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            tokens,
        })
    }

    /// The template text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fields referenced by this template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = TemplateField> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Field(f) => Some(*f),
            Token::Literal(_) => None,
        })
    }

    /// Whether the template already ends in `{name}` (trailing whitespace ignored),
    /// in which case no extra game-name folder is appended below it.
    pub fn ends_with_name(&self) -> bool {
        let mut rev = self.tokens.iter().rev();
        let mut last = rev.next();
        if let Some(Token::Literal(text)) = last {
            if text.trim().is_empty() {
                last = rev.next();
            }
        }
        matches!(last, Some(Token::Field(TemplateField::Name)))
    }

    /// Substitute every placeholder with its value from `values`.
    ///
    /// Fields missing from `values` expand to an empty string.
    pub fn expand(&self, values: &HashMap<TemplateField, String>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field(field) => {
                    if let Some(v) = values.get(field) {
                        out.push_str(v);
                    }
                }
            }
        }
        out
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "tests/template_tests.rs"]
mod tests;
