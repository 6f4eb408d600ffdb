use std;
use std::fmt::{self, Display};
use std::string::FromUtf8Error;
use serde::ser;
use formdata::EncodeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The top-level value did not produce named fields; the contained string names the shape that
    /// was found instead. A multipart body has no anonymous root part.
    RootNotKeyed(&'static str),
    KeyType,
    /// An error raised while visiting a child value, tagged with the key path that was being
    /// visited at the time.
    Traversal(String, Box<Error>),
    Encode(EncodeError),
    Utf8(FromUtf8Error),
    Message(String),
}

impl Error {
    /// Prepends `segment` to the key path of a `Traversal` error, or starts one. Segments compose
    /// into bracketed paths, so an error at field `toy` of element 1 of field `pets` reads
    /// `pets[1][toy]`.
    pub(crate) fn at(self, segment: &str) -> Error {
        match self {
            Error::Traversal(path, inner) => {
                let head = path.find('[').unwrap_or(path.len());
                Error::Traversal(format!("{}[{}]{}", segment, &path[..head], &path[head..]), inner)
            },
            other => Error::Traversal(segment.to_owned(), Box::new(other)),
        }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(msg) => fmt.write_str(msg),
            Error::Encode(e) => write!(fmt, "Encoding error: {}", e),
            Error::RootNotKeyed(found) => write!(fmt, "Top-level value must be a record, found {}", found),
            Error::KeyType => write!(fmt, "Map key must be convertible to a string. Maybe use crate `serde_with` to transform the map into a vec of tuples"),
            Error::Traversal(path, inner) => write!(fmt, "{} at key path `{}`", inner, path),
            Error::Utf8(e) => write!(fmt, "Encoded body isn't valid Utf-8: {}", e),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Error {
        Error::Encode(e)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Error {
        Error::Utf8(e)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Traversal(_, inner) => Some(inner),
            Error::Encode(e) => Some(e),
            Error::Utf8(e) => Some(e),
            _ => None,
        }
    }
}
