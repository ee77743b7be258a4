use super::*;
use alloc::{vec, vec::Vec};
use crate::io::Read;
use thiserror::Error;
use tracing::trace;

/// The largest string payload that will ever be read: one signed 32-bit count.
pub const MAX_RAW_LENGTH: u64 = i32::MAX as u64;

/// Payloads up to this size are read straight into a buffer of the claimed size.
pub const DIRECT_READ_THRESHOLD: usize = 1024 * 1024;

// Block size used when copying payloads above the direct read threshold
const COPY_CHUNK: usize = 32 * 1024;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough data for encoded value: {0}")]
    TruncatedInput(#[from] io::Error),

    #[error("Unsupported additional information value {0}")]
    UnsupportedEncoding(u8),

    #[error("Expected major type {expected:?}, found {found:?}")]
    UnexpectedMajorType {
        expected: MajorType,
        found: MajorType,
    },

    #[error("Cannot read {length} raw bytes, limit is {max}")]
    LengthTooLarge { length: u64, max: u64 },
}

fn read_be<R, const N: usize>(r: &mut R) -> Result<[u8; N], Error>
where
    R: Read + ?Sized,
{
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read the initial byte of a data item and its argument.
///
/// Consumes between 1 and 9 bytes.  Non-minimal argument encodings are
/// accepted; indefinite-length and reserved encodings are not.
pub fn read_header<R>(r: &mut R) -> Result<(MajorType, u64), Error>
where
    R: Read + ?Sized,
{
    let [initial] = read_be::<_, 1>(r)?;
    let argument = match initial & 0x1F {
        minor @ 0..=23 => minor as u64,
        24 => u8::from_be_bytes(read_be(r)?) as u64,
        25 => u16::from_be_bytes(read_be(r)?) as u64,
        26 => u32::from_be_bytes(read_be(r)?) as u64,
        27 => u64::from_be_bytes(read_be(r)?),
        minor => return Err(Error::UnsupportedEncoding(minor)),
    };
    Ok((MajorType::from_initial_byte(initial), argument))
}

/// Read a header and return its argument, failing if the major type is not `expected`.
pub fn read_length<R>(expected: MajorType, r: &mut R) -> Result<u64, Error>
where
    R: Read + ?Sized,
{
    match read_header(r)? {
        (found, argument) if found == expected => Ok(argument),
        (found, _) => Err(Error::UnexpectedMajorType { expected, found }),
    }
}

pub fn read_uint<R>(r: &mut R) -> Result<u64, Error>
where
    R: Read + ?Sized,
{
    read_length(MajorType::UInt, r)
}

/// Read the element count of a definite-length array.
pub fn read_array_len<R>(r: &mut R) -> Result<u64, Error>
where
    R: Read + ?Sized,
{
    read_length(MajorType::Array, r)
}

pub fn read_byte_string_len<R>(r: &mut R) -> Result<u64, Error>
where
    R: Read + ?Sized,
{
    read_length(MajorType::ByteString, r)
}

pub fn read_text_string_len<R>(r: &mut R) -> Result<u64, Error>
where
    R: Read + ?Sized,
{
    read_length(MajorType::TextString, r)
}

/// Bounds applied to string payloads claimed by untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Longest accepted payload.  Values above [`MAX_RAW_LENGTH`] are clamped to it.
    pub max_length: u64,

    /// Longest payload that is allocated up front rather than copied in blocks.
    pub direct_read_threshold: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(MAX_RAW_LENGTH, DIRECT_READ_THRESHOLD)
    }
}

impl Limits {
    pub const fn new(max_length: u64, direct_read_threshold: usize) -> Self {
        Self {
            max_length,
            direct_read_threshold,
        }
    }

    /// The payload ceiling actually enforced: `max_length`, clamped to [`MAX_RAW_LENGTH`].
    pub const fn effective_max_length(&self) -> u64 {
        if self.max_length < MAX_RAW_LENGTH {
            self.max_length
        } else {
            MAX_RAW_LENGTH
        }
    }

    /// Read exactly `length` payload bytes into a new buffer.
    ///
    /// `length` is checked against the ceiling before anything is allocated.
    /// Small payloads are read into a buffer of exactly `length` bytes; larger
    /// ones are copied in blocks, so memory grows with the bytes actually
    /// delivered by the stream rather than with the claimed length.
    #[cfg_attr(
        feature = "instrument",
        tracing::instrument(level = "trace", skip(self, r))
    )]
    pub fn read_raw_bytes<R>(&self, length: u64, r: &mut R) -> Result<Vec<u8>, Error>
    where
        R: Read + ?Sized,
    {
        let max = self.effective_max_length();
        let too_large = Error::LengthTooLarge { length, max };
        if length > max {
            return Err(too_large);
        }
        let length = usize::try_from(length).map_err(|_| too_large)?;

        if length <= self.direct_read_threshold {
            let mut data = vec![0u8; length];
            r.read_exact(&mut data)?;
            Ok(data)
        } else {
            copy_bounded(length, r)
        }
    }

    pub fn read_byte_string<R>(&self, r: &mut R) -> Result<Vec<u8>, Error>
    where
        R: Read + ?Sized,
    {
        let length = read_byte_string_len(r)?;
        self.read_raw_bytes(length, r)
    }

    /// The payload is not checked for UTF-8 validity, see [`Text`].
    pub fn read_text_string<R>(&self, r: &mut R) -> Result<Text, Error>
    where
        R: Read + ?Sized,
    {
        let length = read_text_string_len(r)?;
        self.read_raw_bytes(length, r).map(Text::from)
    }
}

fn copy_bounded<R>(length: usize, r: &mut R) -> Result<Vec<u8>, Error>
where
    R: Read + ?Sized,
{
    let mut data = Vec::new();
    let mut reads = 0usize;
    while data.len() < length {
        let start = data.len();
        data.resize(start + (length - start).min(COPY_CHUNK), 0);
        match r.read(&mut data[start..])? {
            0 => return Err(io::Error::UnexpectedEof.into()),
            n => data.truncate(start + n),
        }
        reads += 1;
    }
    trace!(length, reads, "Copied raw bytes above direct read threshold");
    Ok(data)
}

/// Read exactly `length` payload bytes using the default [`Limits`].
pub fn read_raw_bytes<R>(length: u64, r: &mut R) -> Result<Vec<u8>, Error>
where
    R: Read + ?Sized,
{
    Limits::default().read_raw_bytes(length, r)
}

/// Read a definite-length byte string using the default [`Limits`].
pub fn read_byte_string<R>(r: &mut R) -> Result<Vec<u8>, Error>
where
    R: Read + ?Sized,
{
    Limits::default().read_byte_string(r)
}

/// Read a definite-length text string using the default [`Limits`].
pub fn read_text_string<R>(r: &mut R) -> Result<Text, Error>
where
    R: Read + ?Sized,
{
    Limits::default().read_text_string(r)
}
