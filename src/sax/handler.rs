//! Event handler trait
//!
//! One method per event kind. There are no default methods: a handler says
//! explicitly what it does with every kind, even if that is nothing.
//!
//! Every slice passed to a handler borrows the parser's buffer for the
//! duration of the call only. The next refill may slide or overwrite those
//! bytes, so a handler that needs to keep text must copy it.

/// Receiver of parse events, in document order
pub trait XmlHandler {
    /// Called once, before any other event
    fn start_document(&mut self, depth: i32);

    /// Called once, after the input ended cleanly
    fn end_document(&mut self, depth: i32);

    /// Called for `<qname`, before depth changes
    ///
    /// `prefix` is empty for an unprefixed name. Self-closing tags get this
    /// event only; no `end_tag` follows them.
    fn start_tag(&mut self, depth: i32, qname: &[u8], prefix: &[u8], local_name: &[u8]);

    /// Called for each non-namespace attribute of the open start tag
    fn attribute(
        &mut self,
        depth: i32,
        qname: &[u8],
        prefix: &[u8],
        local_name: &[u8],
        value: &[u8],
    );

    /// Called for `xmlns="uri"` (empty prefix) or `xmlns:prefix="uri"`
    fn namespace(&mut self, depth: i32, prefix: &[u8], uri: &[u8]);

    /// Called for `</qname>`, after depth has been decremented
    fn end_tag(&mut self, depth: i32, prefix: &[u8], qname: &[u8], local_name: &[u8]);

    /// Raw character data containing neither `<` nor `&`
    fn characters(&mut self, depth: i32, characters: &[u8]);

    /// Raw CDATA content; one section may arrive as several ordered fragments
    fn cdata(&mut self, depth: i32, characters: &[u8]);

    /// Replacement text of `&lt;`, `&gt;`, `&amp;`, or a literal `&`
    fn char_entity_ref(&mut self, depth: i32, characters: &[u8]);

    /// Comment content; one comment may arrive as several ordered fragments
    fn comment(&mut self, depth: i32, comment: &[u8]);

    fn declaration(
        &mut self,
        depth: i32,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
    );

    fn processing_instruction(&mut self, depth: i32, target: &[u8], data: &[u8]);
}

impl<H: XmlHandler + ?Sized> XmlHandler for &mut H {
    fn start_document(&mut self, depth: i32) {
        (**self).start_document(depth)
    }

    fn end_document(&mut self, depth: i32) {
        (**self).end_document(depth)
    }

    fn start_tag(&mut self, depth: i32, qname: &[u8], prefix: &[u8], local_name: &[u8]) {
        (**self).start_tag(depth, qname, prefix, local_name)
    }

    fn attribute(
        &mut self,
        depth: i32,
        qname: &[u8],
        prefix: &[u8],
        local_name: &[u8],
        value: &[u8],
    ) {
        (**self).attribute(depth, qname, prefix, local_name, value)
    }

    fn namespace(&mut self, depth: i32, prefix: &[u8], uri: &[u8]) {
        (**self).namespace(depth, prefix, uri)
    }

    fn end_tag(&mut self, depth: i32, prefix: &[u8], qname: &[u8], local_name: &[u8]) {
        (**self).end_tag(depth, prefix, qname, local_name)
    }

    fn characters(&mut self, depth: i32, characters: &[u8]) {
        (**self).characters(depth, characters)
    }

    fn cdata(&mut self, depth: i32, characters: &[u8]) {
        (**self).cdata(depth, characters)
    }

    fn char_entity_ref(&mut self, depth: i32, characters: &[u8]) {
        (**self).char_entity_ref(depth, characters)
    }

    fn comment(&mut self, depth: i32, comment: &[u8]) {
        (**self).comment(depth, comment)
    }

    fn declaration(
        &mut self,
        depth: i32,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
    ) {
        (**self).declaration(depth, version, encoding, standalone)
    }

    fn processing_instruction(&mut self, depth: i32, target: &[u8], data: &[u8]) {
        (**self).processing_instruction(depth, target, data)
    }
}
