//! Metadata extraction and destination resolution for GameBase archives.
//!
//! Turns the text of a `VERSION.NFO` info file into a typed [`GameMetadata`]
//! record, expands a folder template into a collision-free destination path,
//! and renames multi-volume disk images to `<name>_d<N><ext>`.
//!
//! Everything here is synchronous and side-effect free apart from the
//! existence checks of the collision probe and the renames in [`disk`].
//! Nothing in this crate logs; all failures are returned to the caller.

pub mod disk;
pub mod encoding;
pub mod error;
pub mod metadata;
pub mod nfo;
pub mod resolve;
pub mod sanitize;
pub mod split;
pub mod template;

pub use disk::{DISK_IMAGE_EXTENSIONS, DiskRename, rename_disk_images};
pub use encoding::decode_info_text;
pub use error::{ParseError, RenameError, ResolveError, TemplateError};
pub use metadata::{Defaulted, GameMetadata};
pub use nfo::{parse_info_bytes, parse_info_text};
pub use resolve::{
    Destination, DestinationKind, DestinationResolver, canonical_name,
    resolve_destination,
};
pub use sanitize::sanitize_segment;
pub use template::{DEFAULT_TEMPLATE, PathTemplate, TemplateField};
