//! Identity Transform
//!
//! Serializes every event back to XML text. Start tags are written without
//! their closing `>`: attributes and namespace declarations are appended to
//! the open tag, and the next other event decides whether it closes as `>`
//! or `/>`.
//!
//! Text, entity references, and CDATA are all written as escaped character
//! data, so `<![CDATA[a<b]]>` comes back as `a&lt;b`. Comments that reach
//! the handler in several fragments come back as several comments.

use std::io::{self, Write};

use memchr::memchr3;

use crate::sax::handler::XmlHandler;

const DEFAULT_ENCODING: &[u8] = b"UTF-8";
const DEFAULT_STANDALONE: &[u8] = b"no";

/// Handler that writes the document it receives to `W`
pub struct IdentityTransform<W: Write> {
    out: W,
    /// Depth of the start tag still waiting for `>` or `/>`
    open_tag: Option<i32>,
    /// First write error; later writes are skipped
    error: Option<io::Error>,
}

impl<W: Write> IdentityTransform<W> {
    pub fn new(out: W) -> Self {
        IdentityTransform {
            out,
            open_tag: None,
            error: None,
        }
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_all(bytes) {
            self.error = Some(err);
        }
    }

    fn write_escaped(&mut self, mut text: &[u8]) {
        while let Some(i) = memchr3(b'<', b'>', b'&', text) {
            self.write(&text[..i]);
            let escaped: &[u8] = match text[i] {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                _ => b"&amp;",
            };
            self.write(escaped);
            text = &text[i + 1..];
        }
        self.write(text);
    }

    /// Write ` name="value"`, switching to `'` when the value holds a `"`
    fn write_attribute(&mut self, name: &[&[u8]], value: &[u8]) {
        let quote: &[u8] = if value.contains(&b'"') { b"'" } else { b"\"" };
        self.write(b" ");
        for part in name {
            self.write(part);
        }
        self.write(b"=");
        self.write(quote);
        self.write(value);
        self.write(quote);
    }

    /// Close a pending start tag before an event at `depth`
    ///
    /// Content of the element is one level deeper, and its own end tag is at
    /// the same depth; anything else means the tag was self-closing.
    fn close_open_tag(&mut self, depth: i32, is_end_tag: bool) {
        if let Some(open) = self.open_tag.take() {
            if depth > open || (is_end_tag && depth == open) {
                self.write(b">");
            } else {
                self.write(b"/>");
            }
        }
    }
}

impl<W: Write> XmlHandler for IdentityTransform<W> {
    fn start_document(&mut self, _depth: i32) {}

    fn end_document(&mut self, depth: i32) {
        self.close_open_tag(depth, false);
        self.write(b"\n");
    }

    fn start_tag(&mut self, depth: i32, qname: &[u8], _prefix: &[u8], _local_name: &[u8]) {
        self.close_open_tag(depth, false);
        self.write(b"<");
        self.write(qname);
        self.open_tag = Some(depth);
    }

    fn attribute(
        &mut self,
        _depth: i32,
        qname: &[u8],
        _prefix: &[u8],
        _local_name: &[u8],
        value: &[u8],
    ) {
        self.write_attribute(&[qname], value);
    }

    fn namespace(&mut self, _depth: i32, prefix: &[u8], uri: &[u8]) {
        if prefix.is_empty() {
            self.write_attribute(&[&b"xmlns"[..]], uri);
        } else {
            self.write_attribute(&[&b"xmlns:"[..], prefix], uri);
        }
    }

    fn end_tag(&mut self, depth: i32, _prefix: &[u8], qname: &[u8], _local_name: &[u8]) {
        self.close_open_tag(depth, true);
        self.write(b"</");
        self.write(qname);
        self.write(b">");
    }

    fn characters(&mut self, depth: i32, characters: &[u8]) {
        self.close_open_tag(depth, false);
        self.write_escaped(characters);
    }

    fn cdata(&mut self, depth: i32, characters: &[u8]) {
        self.close_open_tag(depth, false);
        self.write_escaped(characters);
    }

    fn char_entity_ref(&mut self, depth: i32, characters: &[u8]) {
        self.close_open_tag(depth, false);
        self.write_escaped(characters);
    }

    fn comment(&mut self, depth: i32, comment: &[u8]) {
        self.close_open_tag(depth, false);
        self.write(b"<!--");
        self.write(comment);
        self.write(b"-->");
    }

    fn declaration(
        &mut self,
        depth: i32,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
    ) {
        self.close_open_tag(depth, false);
        self.write(b"<?xml version=\"");
        self.write(version);
        self.write(b"\" encoding=\"");
        self.write(encoding.unwrap_or(DEFAULT_ENCODING));
        self.write(b"\" standalone=\"");
        self.write(standalone.unwrap_or(DEFAULT_STANDALONE));
        self.write(b"\"?>\n");
    }

    fn processing_instruction(&mut self, depth: i32, target: &[u8], data: &[u8]) {
        self.close_open_tag(depth, false);
        self.write(b"<?");
        self.write(target);
        if !data.is_empty() {
            self.write(b" ");
            self.write(data);
        }
        self.write(b"?>");
        if depth == 0 {
            self.write(b"\n");
        }
    }
}
