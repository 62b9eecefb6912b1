//! Making metadata safe to use as a single path segment.

/// Characters rejected by Windows in file and folder names.
pub const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Sanitize arbitrary text for use as one path segment.
///
/// - `/` and `\` become `-` so a value cannot open a new directory level
/// - `[` and `]` are removed (reserved for the `" [vN]"` collision suffix)
/// - [`FORBIDDEN_CHARS`] are removed
/// - leading and trailing spaces and dots are trimmed
///
/// The result is idempotent: sanitizing it again returns it unchanged.
///
/// ```
/// use gamebase_shelf_core::sanitize::sanitize_segment;
///
/// assert_eq!(sanitize_segment("Pirates! [Gold]"), "Pirates! Gold");
/// assert_eq!(sanitize_segment("Ocean/Imagine"), "Ocean-Imagine");
/// ```
pub fn sanitize_segment(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' => Some('-'),
            '[' | ']' => None,
            c if FORBIDDEN_CHARS.contains(&c) => None,
            c => Some(c),
        })
        .collect();
    cleaned.trim_matches([' ', '.']).to_string()
}
