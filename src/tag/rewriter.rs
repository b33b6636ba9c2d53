//! Edit path: rewrite one frame, copy everything else through.
//!
//! The output is produced in three phases: the prefix (header and the frames
//! before the target, copied unchanged), the target frame with its new size
//! and text, and the raw tail of the file.

use std::io::{Read, Seek, SeekFrom, Write};

use super::copier;
use super::error::{Result, TagError};
use super::frame;
use super::layout::{Field, HEADER_LEN};

/// A single-field replacement. Built once per edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    field: Field,
    text: String,
    new_size: u32,
}

impl EditRequest {
    pub fn new(field: Field, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        // One trailing byte is always accounted for in the size field.
        let new_size = u32::try_from(text.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(TagError::TextTooLong { len: text.len() })?;
        Ok(Self {
            field,
            text,
            new_size,
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Size field value that will be written for the target frame.
    pub fn new_size(&self) -> u32 {
        self.new_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSummary {
    pub field: Field,
    pub old_size: u32,
    pub new_size: u32,
    /// Bytes copied verbatim after the rewritten frame.
    pub tail_bytes: u64,
}

impl RewriteSummary {
    /// How much longer (or shorter, if negative) the output is than the input.
    pub fn length_delta(&self) -> i64 {
        i64::from(self.new_size) - i64::from(self.old_size)
    }
}

/// Rewind `src` and copy its header verbatim to `out`, leaving `src` at the
/// first frame. The header is expected to have been validated already.
pub fn copy_header<R: Read + Seek, W: Write>(src: &mut R, out: &mut W) -> Result<()> {
    src.seek(SeekFrom::Start(0))?;
    copier::copy_exact(src, out, HEADER_LEN as u64)
}

/// Walk the frames after the header, replacing the request's field.
///
/// `src` must sit at the first frame and the header must already be in `out`.
/// Any id out of place is fatal here, since the layout has to be preserved.
pub fn rewrite_frames<R: Read, W: Write>(
    src: &mut R,
    out: &mut W,
    request: &EditRequest,
) -> Result<RewriteSummary> {
    let target = request.field;

    for &field in Field::ALL.iter().take_while(|&&f| f != target) {
        let (size, payload_len) = frame_start(src, out, field)?;
        copy_same(src, out, size, payload_len)?;
    }

    let (old_size, old_payload_len) = frame_start(src, out, target)?;
    frame::write_size(out, request.new_size)?;
    let flags = frame::read_flags(src)?;
    out.write_all(&flags)?;
    // No terminator byte goes on disk; the size field already counts it.
    out.write_all(request.text.as_bytes())?;
    copier::skip_exact(src, old_payload_len)?;

    let tail_bytes = copier::copy_to_end(src, out)?;
    out.flush()?;

    Ok(RewriteSummary {
        field: target,
        old_size,
        new_size: request.new_size,
        tail_bytes,
    })
}

/// Check the id for `field`, read its size and pass the id through.
fn frame_start<R: Read, W: Write>(src: &mut R, out: &mut W, field: Field) -> Result<(u32, u64)> {
    let id = frame::expect_id(src, field, frame::mismatch)?;
    let size = frame::read_size(src)?;
    let payload_len = frame::payload_len(field, size)?;
    out.write_all(&id)?;
    Ok((size, payload_len))
}

/// Copy size, flags and payload of a frame that is not being edited.
fn copy_same<R: Read, W: Write>(src: &mut R, out: &mut W, size: u32, payload_len: u64) -> Result<()> {
    frame::write_size(out, size)?;
    let flags = frame::read_flags(src)?;
    out.write_all(&flags)?;
    copier::copy_exact(src, out, payload_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::frame::fixture;
    use crate::tag::header;
    use crate::tag::scanner;
    use std::io::Cursor;

    const VALUES: [&str; 6] = ["Song", "Band", "Record", "1999", "Rock", "Nice"];

    fn edit(input: &[u8], field: Field, text: &str) -> Result<(Vec<u8>, RewriteSummary)> {
        let mut src = Cursor::new(input.to_vec());
        let mut out = Vec::new();
        header::validate(&mut src)?;
        copy_header(&mut src, &mut out)?;
        let summary = rewrite_frames(&mut src, &mut out, &EditRequest::new(field, text)?)?;
        Ok((out, summary))
    }

    fn view(bytes: Vec<u8>) -> Vec<String> {
        let mut src = Cursor::new(bytes);
        src.set_position(HEADER_LEN as u64);
        scanner::scan(&mut src)
            .into_iter()
            .map(|r| r.value.unwrap())
            .collect()
    }

    #[test]
    fn title_edit_matches_reference_bytes() {
        let input = fixture::tag_file(VALUES, b"\xff\xfbAUDIO");
        let (out, summary) = edit(&input, Field::Title, "Hello").unwrap();

        let mut expected = fixture::HEADER.to_vec();
        expected.extend_from_slice(b"TIT2");
        expected.extend_from_slice(&[0, 0, 0, 6]);
        expected.extend_from_slice(&[0, 0, 0]);
        expected.extend_from_slice(b"Hello");
        // Everything after the old "Song" payload is untouched.
        let old_frame_end = fixture::HEADER.len() + 4 + 4 + 3 + 4;
        expected.extend_from_slice(&input[old_frame_end..]);

        assert_eq!(out, expected);
        assert_eq!(summary.old_size, 5);
        assert_eq!(summary.new_size, 6);
        assert_eq!(summary.length_delta(), 1);
    }

    #[test]
    fn every_field_round_trips_and_leaves_others_alone() {
        let input = fixture::tag_file(VALUES, b"AUDIO");
        for (i, &field) in Field::ALL.iter().enumerate() {
            let (out, summary) = edit(&input, field, "Replacement text").unwrap();
            let delta = "Replacement text".len() as i64 - VALUES[i].len() as i64;
            assert_eq!(out.len() as i64 - input.len() as i64, delta, "{field}");
            assert_eq!(summary.length_delta(), delta);

            let mut expected: Vec<String> = VALUES.iter().map(|v| v.to_string()).collect();
            expected[i] = "Replacement text".to_string();
            assert_eq!(view(out), expected, "{field}");
        }
    }

    #[test]
    fn shrinking_edit_keeps_audio_tail() {
        let input = fixture::tag_file(VALUES, b"\x00\x01\x02\x03");
        let (out, summary) = edit(&input, Field::Album, "R").unwrap();
        assert_eq!(summary.tail_bytes, (fixture::frame(b"TYER", b"1999").len()
            + fixture::frame(b"TCON", b"Rock").len()
            + fixture::frame(b"COMM", b"Nice").len()
            + 4) as u64);
        assert!(out.ends_with(b"\x00\x01\x02\x03"));
        assert_eq!(input.len() - out.len(), "Record".len() - 1);
    }

    #[test]
    fn repeating_the_same_edit_is_idempotent() {
        let input = fixture::tag_file(VALUES, b"AUDIO");
        let (once, _) = edit(&input, Field::Genre, "Jazz").unwrap();
        let (twice, _) = edit(&once, Field::Genre, "Jazz").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn flags_are_carried_through() {
        let mut input = fixture::HEADER.to_vec();
        let mut title = fixture::frame(b"TIT2", b"Song");
        title[8..11].copy_from_slice(&[0x40, 0x01, 0x03]);
        input.extend(title);
        let (out, _) = edit(&input, Field::Title, "X").unwrap();
        assert_eq!(&out[18..21], &[0x40, 0x01, 0x03]);
    }

    #[test]
    fn frames_after_target_are_not_checked() {
        // Only the title frame exists; everything after it is opaque.
        let mut input = fixture::HEADER.to_vec();
        input.extend(fixture::frame(b"TIT2", b"Song"));
        input.extend_from_slice(b"garbage");
        let (out, summary) = edit(&input, Field::Title, "Tune").unwrap();
        assert!(out.ends_with(b"garbage"));
        assert_eq!(summary.tail_bytes, 7);
    }

    #[test]
    fn misplaced_frame_before_target_is_fatal() {
        let mut input = fixture::HEADER.to_vec();
        input.extend(fixture::frame(b"TIT2", b"Song"));
        input.extend(fixture::frame(b"TALB", b"Record"));
        let err = edit(&input, Field::Album, "New").unwrap_err();
        match err {
            TagError::FrameMismatch { field, expected, found } => {
                assert_eq!(field, Field::Artist);
                assert_eq!(expected, "TPE1");
                assert_eq!(found, "TALB");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncated_target_payload_is_unexpected_eof() {
        let mut input = fixture::HEADER.to_vec();
        input.extend(fixture::frame(b"TIT2", b"Song"));
        input.truncate(input.len() - 2);
        let original = input.clone();

        let err = edit(&input, Field::Title, "Hello").unwrap_err();
        match err {
            TagError::IoFailure(e) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(input, original);
    }

    #[test]
    fn zero_size_target_frame_is_rejected() {
        let mut input = fixture::HEADER.to_vec();
        input.extend_from_slice(b"TIT2");
        input.extend_from_slice(&[0, 0, 0, 0]);
        input.extend_from_slice(&[0, 0, 0]);
        input.extend_from_slice(b"AUDIO");
        let original = input.clone();

        let err = edit(&input, Field::Title, "Hello").unwrap_err();
        assert!(matches!(err, TagError::InvalidFrameSize { field: Field::Title }));
        assert_eq!(input, original);
    }

    #[test]
    fn header_copy_rewinds_first() {
        let input = fixture::tag_file(VALUES, b"");
        let mut src = Cursor::new(input.clone());
        src.set_position(25);
        let mut out = Vec::new();
        copy_header(&mut src, &mut out).unwrap();
        assert_eq!(out, &input[..HEADER_LEN]);
        assert_eq!(src.position(), HEADER_LEN as u64);
    }

    #[test]
    fn edit_request_counts_trailing_byte() {
        let req = EditRequest::new(Field::Year, "2024").unwrap();
        assert_eq!(req.new_size(), 5);
        assert_eq!(req.text(), "2024");
        assert_eq!(EditRequest::new(Field::Year, "").unwrap().new_size(), 1);
    }
}
