use super::*;
use crate::io::Write;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Wrote {written} instead of {expected} bytes")]
    IncompleteWrite { written: usize, expected: usize },

    #[error(transparent)]
    Stream(#[from] io::Error),
}

// Initial byte plus up to 8 argument bytes
const MAX_HEADER_LEN: usize = 9;

fn emit_header(major: MajorType, val: u64, buf: &mut [u8; MAX_HEADER_LEN]) -> usize {
    let len = encoded_header_len(val);
    match len {
        1 => buf[0] = major.initial_byte(val as u8),
        2 => {
            buf[0] = major.initial_byte(24);
            buf[1] = val as u8;
        }
        3 => {
            buf[0] = major.initial_byte(25);
            buf[1..3].copy_from_slice(&(val as u16).to_be_bytes());
        }
        5 => {
            buf[0] = major.initial_byte(26);
            buf[1..5].copy_from_slice(&(val as u32).to_be_bytes());
        }
        _ => {
            buf[0] = major.initial_byte(27);
            buf[1..9].copy_from_slice(&val.to_be_bytes());
        }
    }
    len
}

/// The number of bytes [`write_header`] emits for `argument`.
pub const fn encoded_header_len(argument: u64) -> usize {
    if argument < 24 {
        1
    } else if argument <= u8::MAX as u64 {
        2
    } else if argument <= u16::MAX as u64 {
        3
    } else if argument <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

// A single write call, a short count is an error
fn write_all<W>(data: &[u8], w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    let written = w.write(data)?;
    if written != data.len() {
        return Err(Error::IncompleteWrite {
            written,
            expected: data.len(),
        });
    }
    Ok(())
}

/// Write the initial byte and argument of a data item, always using the
/// shortest encoding of `argument`.
pub fn write_header<W>(major: MajorType, argument: u64, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    let mut buf = [0u8; MAX_HEADER_LEN];
    let len = emit_header(major, argument, &mut buf);
    write_all(&buf[..len], w)
}

pub fn write_uint<W>(value: u64, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_header(MajorType::UInt, value, w)
}

/// Write the header of a definite-length array of `count` elements.
pub fn write_array_len<W>(count: u64, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_header(MajorType::Array, count, w)
}

pub fn write_byte_string_len<W>(len: u64, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_header(MajorType::ByteString, len, w)
}

pub fn write_text_string_len<W>(len: u64, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_header(MajorType::TextString, len, w)
}

/// Write a definite-length byte string.
///
/// If the payload write comes up short the header has already been written,
/// and the stream is left holding a truncated item.
pub fn write_byte_string<W>(data: &[u8], w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_byte_string_len(data.len() as u64, w)?;
    write_all(data, w)
}

pub fn write_text_string<W>(text: &str, w: &mut W) -> Result<(), Error>
where
    W: Write + ?Sized,
{
    write_text_string_len(text.len() as u64, w)?;
    write_all(text.as_bytes(), w)
}
