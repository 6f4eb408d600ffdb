//! An encoder for the `multipart/form-data` wire format defined in RFC 2388. A message consists of
//! a flat, ordered list of named parts, each framed by a boundary line and a small header block;
//! part bodies are emitted byte for byte, so binary payloads survive unmodified.
//!
//! # A note on boundaries
//!
//! The boundary is always supplied by the caller and only borrowed for the duration of one encode.
//! Choosing a boundary that occurs literally inside a part body would produce a message that no
//! conforming reader can frame correctly, so the encoder scans every body once and fails with
//! [`EncodeError::BoundaryCollision`] instead of emitting a corrupt message.
//!
//! # A note on part names
//!
//! Quotes and backslashes in part names and filenames are escaped in the header block. A bare
//! carriage return or line feed cannot be escaped within a header line and is rejected with
//! [`EncodeError::InvalidName`], as is an empty name. A content type containing a line break
//! would inject a header line of its own and is rejected with
//! [`EncodeError::InvalidContentType`]. All of these checks run before the first byte reaches
//! the writer, so a failed encode leaves the caller's sink untouched.
//!
//! # Examples
//!
//! ```
//! use formdata::{Encoder, Part};
//!
//! let mut buf = Vec::new();
//! let parts = [Part::text("a", "x")];
//! let written = Encoder::encode(&parts, "123", &mut buf).unwrap();
//! assert_eq!(written, buf.len());
//! assert_eq!(buf, b"--123\r\n\
//!     Content-Disposition: form-data; name=\"a\"\r\n\
//!     \r\n\
//!     x\r\n\
//!     --123--\r\n");
//! ```

mod encode;
mod error;
mod part;

pub use encode::*;
pub use error::*;
pub use part::*;
