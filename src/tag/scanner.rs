//! Read path: decode the six known fields in canonical order.
//!
//! Matching is positional. A field whose frame id is wrong is reported as not
//! found and the next field is read from wherever the stream stopped, so one
//! missing or misordered frame throws off every field after it.

use std::io::Read;

use super::error::Result;
use super::frame;
use super::header::TagHeader;
use super::layout::{Field, COMMENT_PAD_INDEX, COMMENT_PAD_REPLACEMENT};

#[derive(Debug)]
pub struct FieldReading {
    pub field: Field,
    pub value: Result<String>,
}

/// Everything the view operation produced for one file.
#[derive(Debug)]
pub struct TagReport {
    pub header: TagHeader,
    pub fields: Vec<FieldReading>,
}

impl TagReport {
    pub fn get(&self, field: Field) -> Option<&Result<String>> {
        self.fields.iter().find(|r| r.field == field).map(|r| &r.value)
    }

    /// Decoded text of `field`, if it was read successfully.
    pub fn text(&self, field: Field) -> Option<&str> {
        match self.get(field) {
            Some(Ok(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn failures(&self) -> usize {
        self.fields.iter().filter(|r| r.value.is_err()).count()
    }
}

/// Read every known field from `src`, which must sit at the first frame.
pub fn scan<R: Read>(src: &mut R) -> Vec<FieldReading> {
    Field::ALL
        .iter()
        .map(|&field| FieldReading {
            field,
            value: read_field(src, field),
        })
        .collect()
}

/// Decode the frame for `field` at the current position.
pub fn read_field<R: Read>(src: &mut R, field: Field) -> Result<String> {
    frame::expect_id(src, field, frame::not_found)?;
    let size = frame::read_size(src)?;
    frame::read_flags(src)?;

    let len = frame::payload_len(field, size)?;
    let mut payload = Vec::new();
    src.by_ref().take(len).read_to_end(&mut payload)?;
    if (payload.len() as u64) < len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("{} payload truncated at {} of {} bytes", field, payload.len(), len),
        )
        .into());
    }

    if field == Field::Comment {
        patch_comment(&mut payload);
    }
    Ok(display_text(&payload))
}

/// A zero in the fourth comment byte is padding after the language code.
fn patch_comment(payload: &mut [u8]) {
    if let Some(b) = payload.get_mut(COMMENT_PAD_INDEX) {
        if *b == 0 {
            *b = COMMENT_PAD_REPLACEMENT;
        }
    }
}

/// The payload shown as a NUL-terminated string.
fn display_text(payload: &[u8]) -> String {
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    String::from_utf8_lossy(&payload[..end]).into_owned()
}
