//! Conveniently serialize your Rust data structures into `multipart/form-data` request bodies.
//!
//! # Composite field names
//!
//! A value is flattened depth-first into a flat list of named parts. Fields of nested records
//! extend their parent's name with a bracketed segment (`address[city]`), sequence elements with
//! their zero-based index (`tags[0]`). Top-level fields use their bare name. The part order is the
//! declaration order of the visited fields, so the same value always produces the same bytes.
//!
//! Absent optionals, units and empty containers contribute no parts at all; an omitted field and
//! an empty-string field are different messages on wire. The top-level value must have named
//! fields (a struct or a map with stringly keys) because a multipart body has no anonymous root
//! part.
//!
//! Byte leaves (`serde_bytes` and [`File`]) become file-like parts with a `Content-Type` header;
//! [`File`] additionally carries a declared MIME type and filename.
//!
//! # Examples
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Address<'a> {
//!     city: &'a str,
//! }
//!
//! #[derive(Serialize)]
//! struct SignUp<'a> {
//!     name: &'a str,
//!     address: Address<'a>,
//!     tags: Vec<&'a str>,
//!     referrer: Option<&'a str>,
//! }
//!
//! let form = SignUp {
//!     name: "Jessica",
//!     address: Address { city: "Kiel" },
//!     tags: vec!["cat", "fishing"],
//!     referrer: None,
//! };
//!
//! let body = formdata_serde::to_string(&form, "boundary").unwrap();
//! assert_eq!(body, "\
//!     --boundary\r\n\
//!     Content-Disposition: form-data; name=\"name\"\r\n\
//!     \r\n\
//!     Jessica\r\n\
//!     --boundary\r\n\
//!     Content-Disposition: form-data; name=\"address[city]\"\r\n\
//!     \r\n\
//!     Kiel\r\n\
//!     --boundary\r\n\
//!     Content-Disposition: form-data; name=\"tags[0]\"\r\n\
//!     \r\n\
//!     cat\r\n\
//!     --boundary\r\n\
//!     Content-Disposition: form-data; name=\"tags[1]\"\r\n\
//!     \r\n\
//!     fishing\r\n\
//!     --boundary--\r\n");
//! ```

mod error;
mod file;
mod ser;
mod storage;

pub use error::{Error, Result};
pub use file::File;
pub use ser::{to_bytes, to_string, to_writer, Serializer};
