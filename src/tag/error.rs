use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::layout::Field;

pub type Result<T> = std::result::Result<T, TagError>;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("invalid extension: {} does not end in .mp3", .path.display())]
    InvalidExtension { path: PathBuf },

    #[error("invalid tag signature: expected \"ID3\", found {found}")]
    InvalidTagSignature { found: String },

    #[error("unsupported tag version (bytes {found}), only version 3 is handled")]
    UnsupportedTagVersion { found: String },

    #[error("frame mismatch for {field}: expected {expected}, found {found}")]
    FrameMismatch {
        field: Field,
        expected: String,
        found: String,
    },

    #[error("{field} frame not found: expected {expected}, found {found}")]
    FrameNotFound {
        field: Field,
        expected: String,
        found: String,
    },

    #[error("{field} frame has size 0, which leaves no room for a payload")]
    InvalidFrameSize { field: Field },

    #[error("replacement text is too long for a frame ({len} bytes)")]
    TextTooLong { len: usize },

    #[error("failed to open {}: {source}", .path.display())]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("i/o failure: {0}")]
    IoFailure(#[from] io::Error),
}

impl TagError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileOpenFailure {
            path: path.into(),
            source,
        }
    }

    /// Stable short name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TagError::InvalidExtension { .. } => "invalid_extension",
            TagError::InvalidTagSignature { .. } => "invalid_tag_signature",
            TagError::UnsupportedTagVersion { .. } => "unsupported_tag_version",
            TagError::FrameMismatch { .. } => "frame_mismatch",
            TagError::FrameNotFound { .. } => "frame_not_found",
            TagError::InvalidFrameSize { .. } => "invalid_frame_size",
            TagError::TextTooLong { .. } => "text_too_long",
            TagError::FileOpenFailure { .. } => "file_open_failure",
            TagError::IoFailure(_) => "io_failure",
        }
    }
}
