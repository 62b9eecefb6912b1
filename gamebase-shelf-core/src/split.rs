//! Sub-parsers for the composite `Genre:` and `Published:` values.

use crate::metadata::{Defaulted, OTHER, UNKNOWN};

/// Separator between primary and secondary genre.
pub const GENRE_SEPARATOR: &str = " - ";

/// Split a collapsed genre string on the first `" - "`.
///
/// Without a separator the whole text is the primary genre and the secondary
/// genre falls back to [`OTHER`]. Later separators stay in the secondary genre.
pub fn split_genre(genre: &str) -> (String, Defaulted) {
    match genre.split_once(GENRE_SEPARATOR) {
        Some((primary, secondary)) => (
            primary.trim().to_string(),
            Defaulted::Parsed(secondary.trim().to_string()),
        ),
        None => (genre.trim().to_string(), Defaulted::Default(OTHER)),
    }
}

/// Year and publisher taken from a `Published:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub year: Defaulted,
    pub publisher: Defaulted,
}

impl Default for Published {
    fn default() -> Self {
        Self {
            year: Defaulted::Default(UNKNOWN),
            publisher: Defaulted::Default(UNKNOWN),
        }
    }
}

/// Whether a token looks like a release year: exactly four characters, each
/// an ASCII digit or `?` (so `1987`, `198?` and `19??` all qualify).
///
/// Digits from other scripts, such as fullwidth `１９８７`, do not count.
pub fn is_year_shaped(token: &str) -> bool {
    token.chars().count() == 4 && token.chars().all(|c| c.is_ascii_digit() || c == '?')
}

/// Split a `Published:` value into year and publisher.
///
/// Only a year-shaped first token triggers a split. Otherwise the entire
/// value is the publisher and the year keeps its default, even if a year
/// appears later in the text.
pub fn split_published(raw: Option<&str>) -> Published {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Published::default();
    };

    let (first, rest) = match raw.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, Some(rest.trim_start())),
        None => (raw, None),
    };

    if is_year_shaped(first) {
        Published {
            year: Defaulted::Parsed(first.to_string()),
            publisher: Defaulted::or_default(
                rest.filter(|r| !r.is_empty()).map(str::to_string),
                UNKNOWN,
            ),
        }
    } else {
        Published {
            year: Defaulted::Default(UNKNOWN),
            publisher: Defaulted::Parsed(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_with_separator() {
        let (primary, secondary) = split_genre("Action - Platformer");
        assert_eq!(primary, "Action");
        assert_eq!(secondary, Defaulted::Parsed("Platformer".to_string()));
    }

    #[test]
    fn genre_without_separator() {
        let (primary, secondary) = split_genre("Puzzle");
        assert_eq!(primary, "Puzzle");
        assert_eq!(secondary.value(), "Other");
        assert!(secondary.is_default());
    }

    #[test]
    fn genre_splits_only_once() {
        let (primary, secondary) = split_genre("Sports - Winter - Ski Jumping");
        assert_eq!(primary, "Sports");
        assert_eq!(secondary.value(), "Winter - Ski Jumping");
    }

    #[test]
    fn genre_hyphen_without_spaces_is_not_a_separator() {
        let (primary, secondary) = split_genre("Shoot'em-Up");
        assert_eq!(primary, "Shoot'em-Up");
        assert!(secondary.is_default());
    }

    #[test]
    fn published_year_and_publisher() {
        let p = split_published(Some("1987 Activision"));
        assert_eq!(p.year.value(), "1987");
        assert_eq!(p.publisher.value(), "Activision");
    }

    #[test]
    fn published_placeholder_year() {
        let p = split_published(Some("198? Ocean Software"));
        assert_eq!(p.year.value(), "198?");
        assert_eq!(p.publisher.value(), "Ocean Software");
    }

    #[test]
    fn published_without_year_keeps_whole_value() {
        let p = split_published(Some("Unknown Publisher Co"));
        assert!(p.year.is_default());
        assert_eq!(p.year.value(), "Unknown");
        assert_eq!(p.publisher.value(), "Unknown Publisher Co");
    }

    #[test]
    fn published_year_only() {
        let p = split_published(Some("1984"));
        assert_eq!(p.year.value(), "1984");
        assert!(p.publisher.is_default());
    }

    #[test]
    fn published_year_later_in_text_is_ignored() {
        let p = split_published(Some("Ocean 1987"));
        assert!(p.year.is_default());
        assert_eq!(p.publisher.value(), "Ocean 1987");
    }

    #[test]
    fn published_collapses_gap_after_year() {
        let p = split_published(Some("1990   Rainbow Arts"));
        assert_eq!(p.publisher.value(), "Rainbow Arts");
    }

    #[test]
    fn published_absent() {
        assert_eq!(split_published(None), Published::default());
        assert_eq!(split_published(Some("   ")), Published::default());
    }

    #[test]
    fn year_shape() {
        assert!(is_year_shaped("1987"));
        assert!(is_year_shaped("19??"));
        assert!(is_year_shaped("????"));
        assert!(!is_year_shaped("87"));
        assert!(!is_year_shaped("19870"));
        assert!(!is_year_shaped("198x"));
    }

    #[test]
    fn non_ascii_digits_are_not_a_year() {
        assert!(!is_year_shaped("\u{0661}\u{0669}\u{0668}\u{0667}"));
        assert!(!is_year_shaped("\u{FF11}\u{FF19}\u{FF18}\u{FF17}"));

        let p = split_published(Some("\u{FF11}\u{FF19}\u{FF18}\u{FF17} Konami"));
        assert!(p.year.is_default());
        assert_eq!(p.publisher.value(), "\u{FF11}\u{FF19}\u{FF18}\u{FF17} Konami");
    }
}
