//! Plumbing around the `gamebase-shelf-core` engine: finding and extracting
//! archives, filtering, placing games on disk and the shared settings file.

pub mod archive;
pub mod error;
pub mod filter;
pub mod organize;
pub mod scanner;
pub mod settings;
pub mod transfer;

pub use archive::{ExtractedGame, INFO_FILE_NAME, extract_to_temp, find_info_file, open_game, read_info_file};
pub use error::OrganizeError;
pub use filter::{LanguageFilter, collapse_publisher};
pub use organize::{
    ArchiveOutcome, OrganizeOptions, OrganizeProgress, OrganizeSummary, ScannedGame, SkipReason,
    organize, scan_archives,
};
pub use scanner::find_archives;
pub use settings::{AppSettings, OrganizeSettings, load_settings, save_settings, settings_path};
pub use transfer::Transfer;
