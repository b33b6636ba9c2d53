//! Codec for the fixed-layout tag at the front of an MP3 file.

pub mod commit;
pub mod copier;
pub mod endian;
pub mod error;
pub mod frame;
pub mod header;
pub mod layout;
pub mod rewriter;
pub mod scanner;

pub use commit::CommitMode;
pub use error::{Result, TagError};
pub use header::TagHeader;
pub use layout::Field;
pub use rewriter::{EditRequest, RewriteSummary};
pub use scanner::{FieldReading, TagReport};
