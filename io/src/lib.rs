/*!
Portable byte-stream traits consumed by the `cboring` codec.

The traits are deliberately smaller than `std::io`: a source hands out
whatever bytes it has, a sink accepts as many bytes as it can, and both
report failures through a single `Copy` error type so the codec can stay
`no_std`.  Adapters are provided for `std::io` (with the `std` feature)
and for any `embedded-io` device.
*/
#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::vec::Vec;
use thiserror::Error;

pub use embedded_io::ErrorKind;

/// Failures reported by a byte stream.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The source ended before the requested bytes were available.
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// The sink cannot accept any more bytes.
    #[error("Stream accepts no more data")]
    WriteZero,

    /// Any other failure of the underlying stream.
    #[error("Stream failure: {0:?}")]
    Other(ErrorKind),
}

/// A sequential source of bytes.
pub trait Read {
    /// Read up to `buf.len()` bytes, returning how many were read.
    ///
    /// `Ok(0)` for a non-empty `buf` means the end of the stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// Fill `buf` completely, failing with [`Error::UnexpectedEof`] if the
    /// stream ends first.  The contents of `buf` are unspecified on error.
    fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<(), Error> {
        while !buf.is_empty() {
            match self.read(buf)? {
                0 => return Err(Error::UnexpectedEof),
                n => buf = &mut core::mem::take(&mut buf)[n..],
            }
        }
        Ok(())
    }
}

/// A sequential sink of bytes.
pub trait Write {
    /// Write up to `buf.len()` bytes, returning how many were accepted.
    ///
    /// A count short of `buf.len()` means the sink cannot take the rest of
    /// `buf`, not that the caller should try again; sinks that accept
    /// partial buffers for transient reasons must finish the write
    /// themselves.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error>;
}

impl<R: Read + ?Sized> Read for &mut R {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        (**self).read(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_exact(buf)
    }
}

impl<W: Write + ?Sized> Write for &mut W {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        (**self).write(buf)
    }
}

/// Reading from a slice consumes bytes from the front of it.
impl Read for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

/// Writing to a slice fills it from the front, and returns a short count
/// once it is full.
impl Write for &mut [u8] {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let n = buf.len().min(self.len());
        let (head, tail) = core::mem::take(self).split_at_mut(n);
        head.copy_from_slice(&buf[..n]);
        *self = tail;
        Ok(n)
    }
}

impl Write for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Adapter exposing an `embedded-io` device as a [`Read`] or [`Write`].
#[derive(Debug, Default, Clone)]
pub struct FromEmbedded<T>(T);

impl<T> FromEmbedded<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

fn from_embedded_error<E: embedded_io::Error>(e: E) -> Error {
    Error::Other(e.kind())
}

impl<T: embedded_io::Read> Read for FromEmbedded<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        embedded_io::Read::read(&mut self.0, buf).map_err(from_embedded_error)
    }
}

impl<T: embedded_io::Write> Write for FromEmbedded<T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        embedded_io::Write::write(&mut self.0, buf).map_err(from_embedded_error)
    }
}

#[cfg(feature = "std")]
mod from_std {
    use super::*;

    /// Adapter exposing a `std::io` stream as a [`Read`] or [`Write`].
    #[derive(Debug, Default, Clone)]
    pub struct FromStd<T>(T);

    impl<T> FromStd<T> {
        pub fn new(inner: T) -> Self {
            Self(inner)
        }

        pub fn inner(&self) -> &T {
            &self.0
        }

        pub fn inner_mut(&mut self) -> &mut T {
            &mut self.0
        }

        pub fn into_inner(self) -> T {
            self.0
        }
    }

    impl From<std::io::Error> for Error {
        fn from(e: std::io::Error) -> Self {
            use std::io::ErrorKind as Std;

            match e.kind() {
                Std::UnexpectedEof => Error::UnexpectedEof,
                Std::WriteZero => Error::WriteZero,
                Std::Interrupted => Error::Other(ErrorKind::Interrupted),
                Std::InvalidData => Error::Other(ErrorKind::InvalidData),
                Std::InvalidInput => Error::Other(ErrorKind::InvalidInput),
                Std::TimedOut => Error::Other(ErrorKind::TimedOut),
                Std::BrokenPipe => Error::Other(ErrorKind::BrokenPipe),
                Std::ConnectionReset => Error::Other(ErrorKind::ConnectionReset),
                Std::Unsupported => Error::Other(ErrorKind::Unsupported),
                Std::OutOfMemory => Error::Other(ErrorKind::OutOfMemory),
                _ => Error::Other(ErrorKind::Other),
            }
        }
    }

    impl<T: std::io::Read> Read for FromStd<T> {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
            loop {
                match std::io::Read::read(&mut self.0, buf) {
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    r => return Ok(r?),
                }
            }
        }
    }

    /// `std::io` sinks may accept part of a buffer while healthy, so the
    /// whole buffer is written before returning.
    impl<T: std::io::Write> Write for FromStd<T> {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
            std::io::Write::write_all(&mut self.0, buf)?;
            Ok(buf.len())
        }
    }
}

#[cfg(feature = "std")]
pub use from_std::FromStd;
