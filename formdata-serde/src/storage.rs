//! The accumulator built while walking a value. Traversal returns one `Storage` per visited node
//! bottom-up, so a whole encode owns no state beyond its call stack; flattening then turns the
//! finished tree into the flat part list with composite key names.

use crate::error::{Error, Result};
use formdata::Part;
use std::borrow::Cow;

/// MIME type for binary leaves that don't declare their own.
pub(crate) const OCTET_STREAM: &str = "application/octet-stream";
/// Placeholder for binary leaves that don't declare a filename.
pub(crate) const FILENAME: &str = "file";

#[derive(Debug, PartialEq)]
pub struct Leaf {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

impl Leaf {

    pub fn text(value: String) -> Self {
        Self { body: value.into_bytes(), content_type: None, filename: None }
    }

    pub fn binary(body: Vec<u8>) -> Self {
        Self { body, content_type: Some(OCTET_STREAM.to_owned()), filename: Some(FILENAME.to_owned()) }
    }

    /// The textual payload, for leaves that have to act as names (map keys, file metadata).
    /// Binary leaves don't qualify.
    pub fn into_text(self) -> Option<String> {
        match self.content_type {
            None => String::from_utf8(self.body).ok(),
            Some(_) => None,
        }
    }

}

#[derive(Debug, PartialEq)]
pub enum Storage {
    /// Contributes zero parts. Produced by absent optionals and unit values.
    Absent,
    Leaf(Leaf),
    /// Record-like: children keyed by field name, in declaration order.
    Keyed(Vec<(String, Storage)>),
    /// Sequence-like: children in element order.
    Indexed(Vec<Storage>),
}

impl Storage {

    pub fn typename(&self) -> &'static str {
        match *self {
            Self::Absent     => "nothing",
            Self::Leaf(_)    => "a scalar",
            Self::Keyed(_)   => "a record",
            Self::Indexed(_) => "a sequence",
        }
    }

    /// Consumes the tree into its flat part list. Only a keyed root is accepted.
    pub fn into_parts(self) -> Result<Vec<Part<'static>>> {
        match self {
            root @ Storage::Keyed(_) => {
                let mut parts = Vec::new();
                root.flatten_into("", &mut parts);
                Ok(parts)
            },
            other => Err(Error::RootNotKeyed(other.typename())),
        }
    }

    /// Appends this subtree's parts to `parts`, depth-first in discovery order. `path` is the
    /// composite name of this node. Keyed children extend the path with `[key]`, except directly
    /// under the empty root path where the bare key is used. Indexed children always extend with
    /// `[index]`, even under the empty path.
    pub fn flatten_into(self, path: &str, parts: &mut Vec<Part<'static>>) {
        match self {
            Storage::Absent => (),
            Storage::Leaf(leaf) => parts.push(Part {
                name: Cow::Owned(path.to_owned()),
                filename: leaf.filename.map(Cow::Owned),
                content_type: leaf.content_type.map(Cow::Owned),
                body: Cow::Owned(leaf.body),
            }),
            Storage::Keyed(children) => {
                for (key, child) in children {
                    let child_path = if path.is_empty() { key } else { format!("{}[{}]", path, key) };
                    child.flatten_into(&child_path, parts);
                }
            },
            Storage::Indexed(children) => {
                for (index, child) in children.into_iter().enumerate() {
                    child.flatten_into(&format!("{}[{}]", path, index), parts);
                }
            },
        }
    }

}

#[cfg(test)]
mod test {
    use super::{Leaf, Storage};
    use crate::error::Error;

    fn text(value: &str) -> Storage {
        Storage::Leaf(Leaf::text(value.to_owned()))
    }

    fn names(storage: Storage) -> Vec<String> {
        storage.into_parts().unwrap().into_iter().map(|part| part.name.into_owned()).collect()
    }

    #[test]
    fn nested_record_paths() {
        let root = Storage::Keyed(vec![
            ("name".to_owned(), text("Jessica")),
            ("address".to_owned(), Storage::Keyed(vec![("city".to_owned(), text("Kiel"))])),
        ]);
        assert_eq!(names(root), ["name", "address[city]"]);
    }

    #[test]
    fn indexed_paths() {
        let root = Storage::Keyed(vec![
            ("tags".to_owned(), Storage::Indexed(vec![text("x"), text("y")])),
        ]);
        assert_eq!(names(root), ["tags[0]", "tags[1]"]);
    }

    #[test]
    fn indexed_under_empty_path() {
        // The index bracket is appended even without a parent path; sequences never get the bare
        // name treatment that record fields get at the root.
        let mut parts = Vec::new();
        Storage::Indexed(vec![text("x"), text("y")]).flatten_into("", &mut parts);
        assert_eq!(parts.iter().map(|part| part.name.as_ref()).collect::<Vec<_>>(), ["[0]", "[1]"]);
    }

    #[test]
    fn absent_and_empty_containers_contribute_nothing() {
        let root = Storage::Keyed(vec![
            ("a".to_owned(), text("x")),
            ("b".to_owned(), Storage::Absent),
            ("items".to_owned(), Storage::Indexed(Vec::new())),
            ("inner".to_owned(), Storage::Keyed(Vec::new())),
        ]);
        assert_eq!(names(root), ["a"]);
    }

    #[test]
    fn root_must_be_keyed() {
        assert!(matches!(text("x").into_parts().unwrap_err(), Error::RootNotKeyed("a scalar")));
        assert!(matches!(Storage::Indexed(Vec::new()).into_parts().unwrap_err(), Error::RootNotKeyed("a sequence")));
        assert!(matches!(Storage::Absent.into_parts().unwrap_err(), Error::RootNotKeyed("nothing")));
    }

    #[test]
    fn binary_leaf_defaults() {
        let leaf = Leaf::binary(vec![1, 2, 3]);
        assert_eq!(leaf.content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(leaf.filename.as_deref(), Some("file"));
        assert_eq!(Leaf::binary(vec![1]).into_text(), None);
        assert_eq!(Leaf::text("key".to_owned()).into_text().as_deref(), Some("key"));
    }

}
