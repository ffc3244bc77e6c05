//! Per-resource operation groups returned by `CmaSession`.
//!
//! Each method builds a `Call`; nothing is sent until the caller chooses
//! `send` or `enqueue`.

mod appearances;
mod content_types;
mod entries;
mod spaces;

pub use appearances::Appearances;
pub use content_types::ContentTypes;
pub use entries::Entries;
pub use spaces::Spaces;
