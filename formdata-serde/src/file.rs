use crate::error::{Error, Result};
use crate::storage::Storage;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Struct name under which [`File`] announces itself to this crate's serializer. Other formats
/// ignore the name and see a regular three-field struct.
pub(crate) const TOKEN: &str = "$formdata::private::File";

/// A file-typed leaf: a raw payload with optionally declared MIME type and filename.
///
/// Undeclared metadata falls back to `application/octet-stream` and the placeholder filename
/// `file`, the same defaults that apply to plain byte leaves.
///
/// ```
/// use formdata_serde::File;
///
/// let photo = File::new(b"\x89PNG".to_vec())
///     .with_content_type("image/png")
///     .with_filename("cat.png");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    bytes: Vec<u8>,
    content_type: Option<String>,
    filename: Option<String>,
}

impl File {

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into(), content_type: None, filename: None }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

}

impl Serialize for File {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(TOKEN, 3)?;
        state.serialize_field("bytes", &Bytes(&self.bytes))?;
        state.serialize_field("content_type", &self.content_type)?;
        state.serialize_field("filename", &self.filename)?;
        state.end()
    }
}

/// Forces `serialize_bytes`; a bare `&[u8]` would serialize as a sequence.
struct Bytes<'a>(&'a [u8]);

impl<'a> Serialize for Bytes<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

/// Collapses the fields of an intercepted [`File`] back into a single binary leaf, replacing the
/// payload's default metadata with whatever was declared.
pub(crate) fn into_leaf(fields: Vec<(String, Storage)>) -> Result<Storage> {
    let mut leaf = None;
    let mut content_type = None;
    let mut filename = None;
    for (key, storage) in fields {
        match (key.as_str(), storage) {
            ("bytes", Storage::Leaf(payload)) => leaf = Some(payload),
            ("content_type", Storage::Leaf(value)) => content_type = value.into_text(),
            ("filename", Storage::Leaf(value)) => filename = value.into_text(),
            (_, Storage::Absent) => (),
            (key, _) => return Err(Error::Message(format!("Unexpected file field `{}`", key))),
        }
    }
    let mut leaf = match leaf {
        Some(leaf) => leaf,
        None => return Err(Error::Message("File payload missing".to_owned())),
    };
    if content_type.is_some() {
        leaf.content_type = content_type;
    }
    if filename.is_some() {
        leaf.filename = filename;
    }
    Ok(Storage::Leaf(leaf))
}
