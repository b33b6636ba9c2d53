//! Frame-level encode/decode shared by the read and edit paths.
//!
//! On disk a frame is `id(4) | size(4, big-endian) | flags(3) | payload(size - 1)`.

use std::io::{Read, Write};

use super::endian;
use super::error::{Result, TagError};
use super::layout::{display_id, Field, FRAME_FLAGS_LEN, FRAME_ID_LEN, FRAME_SIZE_LEN};

pub type FrameId = [u8; FRAME_ID_LEN];
pub type FrameFlags = [u8; FRAME_FLAGS_LEN];

pub fn read_id<R: Read>(src: &mut R) -> Result<FrameId> {
    let mut id = [0u8; FRAME_ID_LEN];
    src.read_exact(&mut id)?;
    Ok(id)
}

pub fn read_size<R: Read>(src: &mut R) -> Result<u32> {
    let mut raw = [0u8; FRAME_SIZE_LEN];
    src.read_exact(&mut raw)?;
    Ok(endian::decode_size(raw))
}

pub fn write_size<W: Write>(dst: &mut W, size: u32) -> Result<()> {
    dst.write_all(&endian::encode_size(size))?;
    Ok(())
}

pub fn read_flags<R: Read>(src: &mut R) -> Result<FrameFlags> {
    let mut flags = [0u8; FRAME_FLAGS_LEN];
    src.read_exact(&mut flags)?;
    Ok(flags)
}

/// Number of payload bytes that follow the flags for a frame of `size`.
pub fn payload_len(field: Field, size: u32) -> Result<u64> {
    size.checked_sub(1)
        .map(u64::from)
        .ok_or(TagError::InvalidFrameSize { field })
}

/// Read an id and compare it against the frame expected for `field`.
/// On mismatch, `on_mismatch` builds the error so each path can report it
/// under its own kind.
pub fn expect_id<R: Read>(
    src: &mut R,
    field: Field,
    on_mismatch: fn(Field, String, String) -> TagError,
) -> Result<FrameId> {
    let id = read_id(src)?;
    let expected = field.frame_id();
    if id != expected {
        return Err(on_mismatch(field, display_id(&expected), display_id(&id)));
    }
    Ok(id)
}

pub fn mismatch(field: Field, expected: String, found: String) -> TagError {
    TagError::FrameMismatch {
        field,
        expected,
        found,
    }
}

pub fn not_found(field: Field, expected: String, found: String) -> TagError {
    TagError::FrameNotFound {
        field,
        expected,
        found,
    }
}
