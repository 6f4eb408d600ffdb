//! Byte-exact framing of a part list. Every part is introduced by `--boundary`, followed by its
//! header block, an empty line and the raw body; the message ends with `--boundary--`. All line
//! breaks on wire are CRLF. Header order is fixed: `Content-Disposition` first, `Content-Type`
//! second when present.

use crate::error::EncodeError;
use crate::part::Part;
use std::borrow::Cow;
use std::io::Write;

const CRLF: &[u8] = b"\r\n";

/// Used to encode a list of parts into the `multipart/form-data` wire format.
pub struct Encoder<'w, W: Write> {
    writer: &'w mut W,
}

impl<'w, W: Write> Encoder<'w, W> {

    /// Encode the given parts to the given writer, delimited by `boundary`. The resulting `usize`
    /// is the amount of bytes that got written. An empty part list yields only the terminating
    /// boundary line. All parts are validated before the first byte is written, so the writer only
    /// sees a partial message when the writer itself fails mid-stream.
    pub fn encode(parts: &[Part], boundary: &str, writer: &'w mut W) -> Result<usize, EncodeError> {
        let delimiter = format!("--{}", boundary).into_bytes();
        for part in parts {
            validate(part, &delimiter)?;
        }
        let mut encoder = Self { writer };
        let mut c = 0;
        for part in parts {
            c += encoder.encode_part(part, &delimiter)?;
        }
        c += encoder.write(&delimiter)?;
        c += encoder.write(b"--")?;
        c += encoder.write(CRLF)?;
        Ok(c)
    }

    fn encode_part(&mut self, part: &Part, delimiter: &[u8]) -> Result<usize, EncodeError> {
        let mut c = self.write(delimiter)?;
        c += self.write(CRLF)?;
        c += self.write(b"Content-Disposition: form-data; name=\"")?;
        c += self.write(escape(&part.name).as_bytes())?;
        c += self.write(b"\"")?;
        if let Some(filename) = &part.filename {
            c += self.write(b"; filename=\"")?;
            c += self.write(escape(filename).as_bytes())?;
            c += self.write(b"\"")?;
        }
        c += self.write(CRLF)?;
        if let Some(content_type) = &part.content_type {
            c += self.write(b"Content-Type: ")?;
            c += self.write(content_type.as_bytes())?;
            c += self.write(CRLF)?;
        }
        c += self.write(CRLF)?;
        c += self.write(&part.body)?;
        c += self.write(CRLF)?;
        Ok(c)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, EncodeError> {
        self.writer.write_all(bytes)?;
        Ok(bytes.len())
    }

}

/// Everything that can make a part unrepresentable is checked here, before any output is
/// produced. Line breaks cannot be escaped within a header line, and a body containing the
/// delimiter cannot be framed at all.
fn validate(part: &Part, delimiter: &[u8]) -> Result<(), EncodeError> {
    if part.name.is_empty() || has_line_break(&part.name) {
        return Err(EncodeError::InvalidName(part.name.to_string()));
    }
    if let Some(filename) = &part.filename {
        if has_line_break(filename) {
            return Err(EncodeError::InvalidName(filename.to_string()));
        }
    }
    if let Some(content_type) = &part.content_type {
        if has_line_break(content_type) {
            return Err(EncodeError::InvalidContentType(content_type.to_string()));
        }
    }
    if contains(&part.body, delimiter) {
        return Err(EncodeError::BoundaryCollision(part.name.to_string()));
    }
    Ok(())
}

/// Escapes quotes and backslashes for use inside a quoted header parameter. Line breaks cannot be
/// escaped and must be rejected before calling this.
fn escape(value: &str) -> Cow<'_, str> {
    if value.contains(|c| c == '"' || c == '\\') {
        Cow::Owned(value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(value)
    }
}

fn has_line_break(value: &str) -> bool {
    value.contains(|c| c == '\r' || c == '\n')
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod test {
    use super::{contains, escape, Encoder};
    use crate::error::EncodeError;
    use crate::part::Part;

    fn encode(parts: &[Part], boundary: &str) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        let written = Encoder::encode(parts, boundary, &mut buf)?;
        assert_eq!(written, buf.len());
        Ok(buf)
    }

    #[test]
    fn single_text_part() {
        let buf = encode(&[Part::text("a", "x")], "123").unwrap();
        assert_eq!(buf, b"--123\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nx\r\n--123--\r\n");
    }

    #[test]
    fn empty_part_list() {
        let buf = encode(&[], "Z").unwrap();
        assert_eq!(buf, b"--Z--\r\n");
    }

    #[test]
    fn part_order() {
        let buf = encode(&[Part::text("a", "1"), Part::text("b", "2"), Part::text("a", "3")], "X").unwrap();
        assert_eq!(buf, b"--X\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n\
            --X\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\n2\r\n\
            --X\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n3\r\n\
            --X--\r\n");
    }

    #[test]
    fn filename_and_content_type() {
        let part = Part::bytes("photo", &[0x89u8, 0x50, 0x4e, 0x47][..])
            .with_filename("cat.png")
            .with_content_type("image/png");
        let buf = encode(&[part], "B").unwrap();
        let mut expected = b"--B\r\n\
            Content-Disposition: form-data; name=\"photo\"; filename=\"cat.png\"\r\n\
            Content-Type: image/png\r\n\
            \r\n".to_vec();
        expected.extend_from_slice(&[0x89, 0x50, 0x4e, 0x47]);
        expected.extend_from_slice(b"\r\n--B--\r\n");
        assert_eq!(buf, expected);
    }

    #[test]
    fn name_escaping() {
        let buf = encode(&[Part::text("say \"hi\"", "x")], "B").unwrap();
        assert_eq!(buf, b"--B\r\nContent-Disposition: form-data; name=\"say \\\"hi\\\"\"\r\n\r\nx\r\n--B--\r\n");
        let buf = encode(&[Part::text("back\\slash", "x")], "B").unwrap();
        assert_eq!(buf, b"--B\r\nContent-Disposition: form-data; name=\"back\\\\slash\"\r\n\r\nx\r\n--B--\r\n");
    }

    #[test]
    fn invalid_names() {
        assert!(matches!(encode(&[Part::text("", "x")], "B").unwrap_err(), EncodeError::InvalidName(_)));
        assert!(matches!(encode(&[Part::text("a\r\nb", "x")], "B").unwrap_err(), EncodeError::InvalidName(_)));
        assert!(matches!(encode(&[Part::text("a\nb", "x")], "B").unwrap_err(), EncodeError::InvalidName(_)));
        let part = Part::text("a", "x").with_filename("evil\r\n.txt");
        assert!(matches!(encode(&[part], "B").unwrap_err(), EncodeError::InvalidName(_)));
    }

    #[test]
    fn invalid_content_type() {
        let part = Part::text("a", "x").with_content_type("text/plain\r\nX-Injected: oops");
        let err = encode(&[part], "B").unwrap_err();
        assert!(matches!(err, EncodeError::InvalidContentType(_)));
        let part = Part::text("a", "x").with_content_type("text/plain\nrest");
        assert!(matches!(encode(&[part], "B").unwrap_err(), EncodeError::InvalidContentType(_)));
    }

    #[test]
    fn no_output_on_rejected_input() {
        // A bad part anywhere in the list must not leave earlier parts in the sink.
        let mut buf = Vec::new();
        let parts = [Part::text("a", "x"), Part::text("bad\nname", "y")];
        assert!(Encoder::encode(&parts, "B", &mut buf).is_err());
        assert!(buf.is_empty());
        let parts = [Part::text("a", "x"), Part::text("b", "see --B inline")];
        assert!(Encoder::encode(&parts, "B", &mut buf).is_err());
        assert!(buf.is_empty());
        let parts = [Part::text("a", "x"), Part::text("b", "y").with_content_type("a\r\nb")];
        assert!(Encoder::encode(&parts, "B", &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn boundary_collision() {
        let err = encode(&[Part::text("a", "see --123 inline")], "123").unwrap_err();
        assert!(matches!(err, EncodeError::BoundaryCollision(name) if name == "a"));
        // The bare boundary without the leading dashes is harmless.
        assert!(encode(&[Part::text("a", "123")], "123").is_ok());
    }

    #[test]
    fn binary_body_unmodified() {
        let body = [0u8, 0xff, 0x0d, 0x0a, 0x2d, 0x2d];
        let buf = encode(&[Part::bytes("blob", &body[..])], "B").unwrap();
        let start = buf.windows(4).position(|w| w == &b"\r\n\r\n"[..]).unwrap() + 4;
        assert_eq!(&buf[start..start + body.len()], &body);
    }

    #[test]
    fn escaping() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\"b"), "a\\\"b");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("\\\""), "\\\\\\\"");
    }

    #[test]
    fn delimiter_search() {
        assert!(contains(b"xx--Byy", b"--B"));
        assert!(contains(b"--B", b"--B"));
        assert!(!contains(b"-B-", b"--B"));
        assert!(!contains(b"", b"--B"));
    }

}
