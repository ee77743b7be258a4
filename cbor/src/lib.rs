/*!
A streaming codec for the building blocks of RFC 8949 CBOR: the initial
byte and argument that prefix every data item, and the definite-length
byte and text strings built on top of them.

Every operation works directly against a [`io::Read`] or [`io::Write`]
stream, holds no state between calls, and either completes or returns an
error; there are no partial results.
*/
#![no_std]
extern crate alloc;

mod major_type;
mod text;

pub mod decode;
pub mod encode;

pub use cboring_io as io;
pub use major_type::MajorType;
pub use text::Text;
