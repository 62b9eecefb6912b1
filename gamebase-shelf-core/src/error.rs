use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning an info file into metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No candidate text encoding produced usable text
    #[error("could not decode info file with any supported encoding")]
    DecodeFailure,

    /// A mandatory `Label:` line was not found
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: &'static str },

    /// No `Genre:` field anywhere in the info section
    #[error("missing required field 'Genre'")]
    MissingGenre,
}

/// Errors raised while parsing a folder template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a placeholder that does not exist
    #[error("Invalid template field: {{{field}}}\nValid fields are: {}", .valid.join(", "))]
    UnknownField { field: String, valid: Vec<String> },

    /// Unbalanced or empty braces
    #[error("Malformed template '{template}': {reason}")]
    Malformed { template: String, reason: String },
}

impl TemplateError {
    pub fn malformed(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while computing a destination path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The collision probe ran out of version suffixes
    #[error("no free destination for {} after {attempts} attempts", .path.display())]
    DestinationExhausted { path: PathBuf, attempts: u32 },
}

/// Errors raised while renaming disk images inside a game folder.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error walking {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The target name is taken by something that is not one of the images
    #[error("cannot rename into {}: path is occupied", .path.display())]
    TargetOccupied { path: PathBuf },
}
