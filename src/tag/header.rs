//! Tag header validation.

use std::io::{self, Read};

use super::error::{Result, TagError};
use super::layout::{display_id, HEADER_LEN, SIGNATURE, SIGNATURE_LEN, SUPPORTED_VERSION, VERSION_LEN};

/// The fixed 10-byte prefix of a tagged file. Only the signature and version
/// are interpreted; the rest is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    raw: [u8; HEADER_LEN],
}

impl TagHeader {
    pub fn raw(&self) -> &[u8; HEADER_LEN] {
        &self.raw
    }

    pub fn version_bytes(&self) -> [u8; VERSION_LEN] {
        [self.raw[SIGNATURE_LEN], self.raw[SIGNATURE_LEN + 1]]
    }

    /// The version field read as a little-endian `u16`.
    pub fn version(&self) -> u16 {
        u16::from_le_bytes(self.version_bytes())
    }
}

/// Check signature and version, leaving `src` positioned at the first frame.
pub fn validate<R: Read>(src: &mut R) -> Result<TagHeader> {
    let mut raw = [0u8; HEADER_LEN];
    let got = read_up_to(src, &mut raw)?;

    if got < SIGNATURE_LEN || raw[..SIGNATURE_LEN] != SIGNATURE {
        return Err(TagError::InvalidTagSignature {
            found: display_id(&raw[..got.min(SIGNATURE_LEN)]),
        });
    }

    let version_end = SIGNATURE_LEN + VERSION_LEN;
    let version_ok = got >= version_end
        && u16::from_le_bytes([raw[SIGNATURE_LEN], raw[SIGNATURE_LEN + 1]]) == SUPPORTED_VERSION;
    if !version_ok {
        return Err(TagError::UnsupportedTagVersion {
            found: hex(&raw[SIGNATURE_LEN..got.min(version_end)]),
        });
    }

    if got < HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("tag header truncated at {} of {} bytes", got, HEADER_LEN),
        )
        .into());
    }

    Ok(TagHeader { raw })
}

/// Fill as much of `buf` as the stream allows; a short count means EOF.
fn read_up_to<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<missing>".to_string();
    }
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
