//! Verbatim byte transfer between streams.

use std::io::{self, Read, Write};

use super::error::Result;

/// Copy everything from the reader's current position to end of stream.
/// Returns the number of bytes written.
pub fn copy_to_end<R: Read, W: Write>(src: &mut R, dst: &mut W) -> Result<u64> {
    Ok(io::copy(src, dst)?)
}

/// Copy exactly `len` bytes. Running out of input first is an error.
pub fn copy_exact<R: Read, W: Write>(src: &mut R, dst: &mut W, len: u64) -> Result<()> {
    let copied = io::copy(&mut src.by_ref().take(len), dst)?;
    if copied < len {
        return Err(unexpected_eof(len, copied).into());
    }
    Ok(())
}

/// Consume exactly `len` bytes without writing them anywhere.
pub fn skip_exact<R: Read>(src: &mut R, len: u64) -> Result<()> {
    copy_exact(src, &mut io::sink(), len)
}

fn unexpected_eof(wanted: u64, got: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("stream ended after {} of {} bytes", got, wanted),
    )
}
