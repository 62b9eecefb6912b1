//! Text decoding for info files.
//!
//! Info files come from many different tools and eras, so the bytes are run
//! through an ordered ladder of `(encoding, policy)` attempts. Every encoding
//! is first tried strictly; only when all strict attempts fail are the same
//! encodings retried with U+FFFD replacement.

use crate::error::ParseError;

/// A character encoding an info file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with an optional byte-order mark
    Utf8,
    /// Windows code page 1252
    Windows1252,
    /// ISO-8859-1
    Latin1,
}

/// How undecodable bytes are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Strict,
    Replace,
}

/// The attempts made by [`decode_info_text`], in order.
pub const DECODE_LADDER: &[(TextEncoding, ErrorPolicy)] = &[
    (TextEncoding::Utf8, ErrorPolicy::Strict),
    (TextEncoding::Windows1252, ErrorPolicy::Strict),
    (TextEncoding::Latin1, ErrorPolicy::Strict),
    (TextEncoding::Utf8, ErrorPolicy::Replace),
    (TextEncoding::Windows1252, ErrorPolicy::Replace),
    (TextEncoding::Latin1, ErrorPolicy::Replace),
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Windows-1252 mappings for 0x80..=0x9F. `None` marks the five undefined bytes.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

impl TextEncoding {
    /// Decode `bytes`, returning `None` when a strict attempt hits an invalid byte.
    pub fn decode(self, bytes: &[u8], policy: ErrorPolicy) -> Option<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                match policy {
                    ErrorPolicy::Strict => std::str::from_utf8(bytes).ok().map(str::to_string),
                    ErrorPolicy::Replace => Some(String::from_utf8_lossy(bytes).into_owned()),
                }
            }
            Self::Windows1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => match CP1252_HIGH[(b - 0x80) as usize] {
                        Some(c) => Some(c),
                        None if policy == ErrorPolicy::Replace => Some(char::REPLACEMENT_CHARACTER),
                        None => None,
                    },
                    _ => Some(b as char),
                })
                .collect(),
            Self::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

/// Run the ladder and report which attempt produced the text.
///
/// Within a pass the first encoding that decodes wins. If that text is empty
/// the pass is over and the next policy is tried. Strict ISO-8859-1 accepts
/// every byte, so non-empty input is always settled by the strict pass; the
/// replacement pass only ever sees input that decodes to nothing.
pub fn decode_attempt(bytes: &[u8]) -> Option<(TextEncoding, ErrorPolicy, String)> {
    let mut finished_pass = None;
    for &(encoding, policy) in DECODE_LADDER {
        if finished_pass == Some(policy) {
            continue;
        }
        if let Some(text) = encoding.decode(bytes, policy) {
            if !text.is_empty() {
                return Some((encoding, policy, text));
            }
            finished_pass = Some(policy);
        }
    }
    None
}

/// Decode raw info-file bytes into text with normalized `\n` line endings.
///
/// An empty (or BOM-only) file fails with [`ParseError::DecodeFailure`].
pub fn decode_info_text(bytes: &[u8]) -> Result<String, ParseError> {
    decode_attempt(bytes)
        .map(|(_, _, text)| normalize_newlines(&text))
        .ok_or(ParseError::DecodeFailure)
}

fn normalize_newlines(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}
