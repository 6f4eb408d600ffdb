use std::fmt::{Display, Formatter, self};

#[derive(Debug)]
pub enum EncodeError {
    Io(std::io::Error),
    /// The contained part name or filename is empty or contains a line break.
    InvalidName(String),
    /// The contained content type contains a line break and would inject a header line.
    InvalidContentType(String),
    /// The body of the named part contains the literal boundary delimiter.
    BoundaryCollision(String),
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> EncodeError {
        EncodeError::Io(e)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            EncodeError::Io(e) => write!(f, "IO error {}", e),
            EncodeError::InvalidName(name) => write!(f, "Part name `{}` is empty or contains a line break", name),
            EncodeError::InvalidContentType(value) => write!(f, "Content type `{}` contains a line break", value),
            EncodeError::BoundaryCollision(name) => write!(f, "Body of part `{}` contains the boundary delimiter", name),
        }
    }
}
