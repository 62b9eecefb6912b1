//! Per-game filters applied before a game is organized.

use gamebase_shelf_core::{Defaulted, GameMetadata};

/// Which languages to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageFilter {
    /// Only keep games whose language mentions English
    pub english_only: bool,
    /// With `english_only`, also keep games without text
    pub include_no_text: bool,
}

impl LanguageFilter {
    /// Whether a game with this language passes the filter.
    pub fn accepts(&self, language: &str) -> bool {
        if !self.english_only {
            return true;
        }
        let lower = language.to_lowercase();
        lower.contains("english") || (self.include_no_text && lower.contains("(no text)"))
    }
}

/// Cut a publisher at the first `/` or `\`.
///
/// `"Ocean/Imagine"` becomes `"Ocean"`; names without a separator are returned unchanged.
pub fn collapse_publisher(publisher: &str) -> &str {
    ['/', '\\']
        .into_iter()
        .find_map(|sep| publisher.split_once(sep).map(|(head, _)| head.trim()))
        .unwrap_or(publisher)
}

/// Apply [`collapse_publisher`] to a record in place. Defaulted publishers are left alone.
pub fn collapse_publisher_in(meta: &mut GameMetadata) {
    let collapsed = match &meta.publisher {
        Defaulted::Parsed(publisher) => {
            let short = collapse_publisher(publisher);
            (short != publisher.as_str()).then(|| short.to_string())
        }
        Defaulted::Default(_) => None,
    };
    if let Some(short) = collapsed {
        meta.publisher = Defaulted::Parsed(short);
    }
}
