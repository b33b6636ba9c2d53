use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Length of the fixed tag header at the start of the file.
pub const HEADER_LEN: usize = 10;
pub const SIGNATURE: [u8; 3] = *b"ID3";
pub const SIGNATURE_LEN: usize = 3;
pub const VERSION_LEN: usize = 2;
pub const SUPPORTED_VERSION: u16 = 3;

pub const FRAME_ID_LEN: usize = 4;
pub const FRAME_SIZE_LEN: usize = 4;
pub const FRAME_FLAGS_LEN: usize = 3;

/// Byte position inside a comment payload that may hold a zero left behind by
/// the language code; shown as `.` when viewing.
pub const COMMENT_PAD_INDEX: usize = 3;
pub const COMMENT_PAD_REPLACEMENT: u8 = b'.';

/// Required file suffix, compared case-sensitively.
pub const MP3_EXTENSION: &str = "mp3";

/// Conventional name of the staged copy in copy-back commit mode.
pub const STAGED_FILE_NAME: &str = "Modified.mp3";

/// The six frames this tool knows about, in the order they sit in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[value(alias = "t")]
    Title,
    #[value(alias = "a")]
    Artist,
    #[value(alias = "A")]
    Album,
    #[value(alias = "y")]
    Year,
    #[value(alias = "m")]
    Genre,
    #[value(alias = "c")]
    Comment,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Year,
        Field::Genre,
        Field::Comment,
    ];

    /// Frame identifier as stored on disk.
    pub fn frame_id(&self) -> [u8; FRAME_ID_LEN] {
        match self {
            Field::Title => *b"TIT2",
            Field::Artist => *b"TPE1",
            Field::Album => *b"TALB",
            Field::Year => *b"TYER",
            Field::Genre => *b"TCON",
            Field::Comment => *b"COMM",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::Comment => "comment",
        }
    }

    /// Column label used by the view listing.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "TITLE",
            Field::Artist => "ARTIST",
            Field::Album => "ALBUM",
            Field::Year => "YEAR",
            Field::Genre => "MUSIC",
            Field::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a frame id for messages; non-printable bytes are escaped.
pub fn display_id(id: &[u8]) -> String {
    id.iter()
        .flat_map(|b| std::ascii::escape_default(*b))
        .map(char::from)
        .collect()
}
