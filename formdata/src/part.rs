//! The unit of a multipart body is the `Part`. Parts carry their payloads in `Cow`s so that
//! borrowed data can be encoded without copies while generated part lists can own their contents.

use std::borrow::Cow;

/// A single named part of a `multipart/form-data` message.
///
/// Duplicate names within one part list are legal and represent multi-valued fields. A present
/// `filename` makes the part file-like and is emitted as the `filename` parameter of the
/// `Content-Disposition` header; a present `content_type` is emitted as its own header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Part<'a> {
    pub name: Cow<'a, str>,
    pub filename: Option<Cow<'a, str>>,
    pub content_type: Option<Cow<'a, str>>,
    pub body: Cow<'a, [u8]>,
}

impl<'a> Part<'a> {

    /// A text part whose body is the UTF-8 encoding of `body`.
    pub fn text(name: impl Into<Cow<'a, str>>, body: impl Into<Cow<'a, str>>) -> Self {
        let body = match body.into() {
            Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
            Cow::Owned(text) => Cow::Owned(text.into_bytes()),
        };
        Self { name: name.into(), filename: None, content_type: None, body }
    }

    /// A raw binary part. The body reaches the wire unmodified.
    pub fn bytes(name: impl Into<Cow<'a, str>>, body: impl Into<Cow<'a, [u8]>>) -> Self {
        Self { name: name.into(), filename: None, content_type: None, body: body.into() }
    }

    pub fn with_filename(mut self, filename: impl Into<Cow<'a, str>>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<Cow<'a, str>>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

}
