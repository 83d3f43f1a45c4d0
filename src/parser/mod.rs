//! Streaming XML Parser
//!
//! A single-threaded, push-style scanner: `parse()` drives a loop over the
//! input window, selects one construct per iteration, advances the cursor
//! past it, and calls the matching `XmlHandler` method with slices of the
//! live buffer.
//!
//! Input larger than memory is handled by refilling the window:
//! - before dispatch, whenever lookahead drops under the low-water mark
//! - inside bounded constructs (tags, declarations, PIs) until they are complete
//! - between fragments of comments and CDATA sections, which are emitted as
//!   they stream past and may therefore arrive as several ordered events

pub mod dispatch;

use std::borrow::Cow;
use std::io::Read;

use memchr::{memchr2, memmem};
use tracing::trace;

use crate::core::attributes::{scan_attribute, scan_declaration};
use crate::core::classify::space_len;
use crate::core::entities::decode_entity_ref;
use crate::core::error::{ErrorKind, ParseError, Result};
use crate::core::scanner::{
    scan_end_tag, scan_processing_instruction, scan_start_tag, Scan, TagClose,
};
use crate::reader::buffered::{InputBuffer, DEFAULT_BUFFER_SIZE};
use crate::sax::handler::XmlHandler;
use dispatch::{Construct, LexicalState};

/// Lookahead below which the window is refilled before dispatch
pub const LOW_WATER_MARK: usize = 5;

/// Lookahead needed to classify markup (`<![CDATA[` is the longest opener)
pub const MARKUP_LOOKAHEAD: usize = 9;

const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &[u8] = b"-->";
const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &[u8] = b"]]>";

#[inline]
fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Initial buffer capacity; the buffer doubles when one construct outgrows it
    pub buffer_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            buffer_capacity: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ParserConfig {
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

/// Summary of a completed parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    /// Bytes read from the source
    pub total_bytes: u64,
    /// Refill calls, including the one that reported end of stream
    pub refills: u64,
    /// Depth at end of document; 0 for balanced input
    pub final_depth: i32,
}

/// Which multi-window section is streaming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Comment,
    CData,
}

impl Section {
    fn terminator(self) -> &'static [u8] {
        match self {
            Section::Comment => COMMENT_END,
            Section::CData => CDATA_END,
        }
    }

    fn unterminated(self) -> ErrorKind {
        match self {
            Section::Comment => ErrorKind::UnterminatedComment,
            Section::CData => ErrorKind::UnterminatedCData,
        }
    }
}

/// Length of the longest proper prefix of `terminator` that ends `window`
///
/// Those bytes are held back so a terminator split by a refill is still found.
fn partial_terminator_len(window: &[u8], terminator: &[u8]) -> usize {
    (1..terminator.len())
        .rev()
        .find(|&k| window.ends_with(&terminator[..k]))
        .unwrap_or(0)
}

/// Parsing progress for one document
#[derive(Debug, Default)]
pub struct ParserState {
    /// Open-element nesting level; 0 outside the root element
    pub depth: i32,
    /// A start tag's attributes are being scanned
    pub in_tag: bool,
    /// Name of the open start tag while `in_tag`
    tag_qname: Vec<u8>,
    tag_prefix_len: usize,
    pub in_comment: bool,
    pub in_cdata: bool,
    /// The current comment/CDATA section has produced at least one event
    section_emitted: bool,
}

impl ParserState {
    pub fn lexical_state(&self) -> LexicalState {
        LexicalState::new(self.in_tag, self.in_comment, self.in_cdata, self.depth)
    }

    fn open(&mut self, qname: &[u8], prefix_len: usize) {
        self.tag_qname.clear();
        self.tag_qname.extend_from_slice(qname);
        self.tag_prefix_len = prefix_len;
        self.in_tag = true;
    }

    /// Apply how the start tag (or its last attribute) ended
    fn close(&mut self, close: TagClose) {
        match close {
            TagClose::Open => {
                self.in_tag = false;
                self.depth += 1;
            }
            TagClose::SelfClosing => {
                if self.in_tag {
                    trace!(
                        qname = %text(&self.tag_qname),
                        prefix = %text(&self.tag_qname[..self.tag_prefix_len]),
                        "self-closing tag"
                    );
                }
                self.in_tag = false;
            }
            TagClose::Pending => {}
        }
    }

    fn in_section(&self, section: Section) -> bool {
        match section {
            Section::Comment => self.in_comment,
            Section::CData => self.in_cdata,
        }
    }

    fn set_section(&mut self, section: Section, inside: bool) {
        match section {
            Section::Comment => self.in_comment = inside,
            Section::CData => self.in_cdata = inside,
        }
    }
}

/// Streaming XML parser over any byte source
pub struct XmlParser<R: Read> {
    input: InputBuffer<R>,
    state: ParserState,
}

impl<R: Read> XmlParser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        XmlParser {
            input: InputBuffer::with_capacity(reader, config.buffer_capacity),
            state: ParserState::default(),
        }
    }

    /// Parse the whole document, calling `handler` for every event
    ///
    /// `start_document` is called first and `end_document` only when the
    /// input ends cleanly. On error, no event follows the failure and the
    /// parser cannot be resumed.
    pub fn parse<H: XmlHandler + ?Sized>(mut self, handler: &mut H) -> Result<ParseStats> {
        trace!("start document");
        handler.start_document(self.state.depth);

        loop {
            self.ensure_lookahead()?;
            if self.is_end_of_input() {
                break;
            }
            let construct = dispatch::select(self.state.lexical_state(), self.input.window());
            match construct {
                Construct::Attribute => self.parse_attribute(handler)?,
                Construct::Comment => self.parse_comment(handler)?,
                Construct::CData => self.parse_cdata(handler)?,
                Construct::Declaration => self.parse_declaration(handler)?,
                Construct::ProcessingInstruction => self.parse_processing_instruction(handler)?,
                Construct::EndTag => self.parse_end_tag(handler)?,
                Construct::StartTag => self.parse_start_tag(handler)?,
                Construct::Whitespace => self.skip_whitespace(),
                Construct::EntityRef => self.parse_entity_ref(handler),
                Construct::Characters => self.parse_characters(handler),
            }
        }

        trace!(depth = self.state.depth, "end document");
        handler.end_document(self.state.depth);

        Ok(ParseStats {
            total_bytes: self.input.total_bytes(),
            refills: self.input.refills(),
            final_depth: self.state.depth,
        })
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.input.position(), self.state.depth)
    }

    fn refill(&mut self) -> Result<usize> {
        self.input.refill().map_err(|e| self.error(ErrorKind::Io(e)))
    }

    /// Refill until the window holds enough bytes to select a construct
    fn ensure_lookahead(&mut self) -> Result<()> {
        loop {
            let window = self.input.window();
            let low_water = if self.state.in_tag || window.first() == Some(&b'<') {
                MARKUP_LOOKAHEAD
            } else {
                LOW_WATER_MARK
            };
            if window.len() >= low_water || self.input.is_eof() {
                return Ok(());
            }
            self.refill()?;
        }
    }

    fn is_end_of_input(&self) -> bool {
        self.input.lookahead() == 0
            && !self.state.in_comment
            && !self.state.in_cdata
            && !self.state.in_tag
    }

    /// Scan a bounded construct, refilling until it is complete
    fn scan_complete<T>(
        &mut self,
        scan: impl Fn(&[u8]) -> Scan<T>,
        unterminated: ErrorKind,
    ) -> Result<T> {
        loop {
            match scan(self.input.window()) {
                Ok(Some(found)) => return Ok(found),
                Ok(None) => {
                    if self.refill()? == 0 {
                        return Err(self.error(unterminated));
                    }
                }
                Err(kind) => return Err(self.error(kind)),
            }
        }
    }

    fn parse_start_tag<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let scan = self.scan_complete(scan_start_tag, ErrorKind::UnterminatedTag)?;
        let window = self.input.window();
        let qname = scan.name.qname.slice(window);
        let prefix = scan.name.prefix().slice(window);
        let local_name = scan.name.local().slice(window);
        trace!(
            depth = self.state.depth,
            qname = %text(qname),
            prefix = %text(prefix),
            local_name = %text(local_name),
            "start tag"
        );
        handler.start_tag(self.state.depth, qname, prefix, local_name);
        if scan.close == TagClose::Pending {
            self.state.open(qname, scan.name.prefix_len);
        }
        self.state.close(scan.close);
        self.input.consume(scan.consumed);
        Ok(())
    }

    /// Parse one attribute or namespace declaration of the open start tag
    fn parse_attribute<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let unterminated = if self.input.window().starts_with(b"xmlns") {
            ErrorKind::UnterminatedNamespace
        } else {
            ErrorKind::UnterminatedAttribute
        };
        let scan = self.scan_complete(scan_attribute, unterminated)?;
        let window = self.input.window();
        let depth = self.state.depth;
        let value = scan.value.slice(window);
        match scan.namespace_prefix(window) {
            Some(prefix) => {
                let prefix = prefix.slice(window);
                trace!(depth, prefix = %text(prefix), uri = %text(value), "namespace");
                handler.namespace(depth, prefix, value);
            }
            None => {
                let qname = scan.name.qname.slice(window);
                let prefix = scan.name.prefix().slice(window);
                let local_name = scan.name.local().slice(window);
                trace!(
                    depth,
                    qname = %text(qname),
                    prefix = %text(prefix),
                    local_name = %text(local_name),
                    value = %text(value),
                    "attribute"
                );
                handler.attribute(depth, qname, prefix, local_name, value);
            }
        }
        self.state.close(scan.close);
        self.input.consume(scan.consumed);
        Ok(())
    }

    fn parse_end_tag<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let scan = self.scan_complete(scan_end_tag, ErrorKind::UnterminatedEndTag)?;
        let window = self.input.window();
        let qname = scan.name.qname.slice(window);
        let prefix = scan.name.prefix().slice(window);
        let local_name = scan.name.local().slice(window);
        self.state.depth -= 1;
        trace!(
            depth = self.state.depth,
            prefix = %text(prefix),
            qname = %text(qname),
            local_name = %text(local_name),
            "end tag"
        );
        handler.end_tag(self.state.depth, prefix, qname, local_name);
        self.input.consume(scan.consumed);
        Ok(())
    }

    fn parse_comment<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        self.parse_section(handler, Section::Comment, COMMENT_START)
    }

    fn parse_cdata<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        self.parse_section(handler, Section::CData, CDATA_START)
    }

    /// Emit the next fragment of a comment or CDATA section
    ///
    /// When the terminator is not in the window, everything up to a possible
    /// partial terminator is emitted and the section stays open for the next
    /// iteration, which refills first.
    fn parse_section<H: XmlHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        section: Section,
        opener: &[u8],
    ) -> Result<()> {
        if !self.state.in_section(section) {
            self.input.consume(opener.len());
            self.state.set_section(section, true);
            self.state.section_emitted = false;
        }

        let terminator = section.terminator();
        let window = self.input.window();
        let (content, consumed, done) = match memmem::find(window, terminator) {
            Some(end) => (&window[..end], end + terminator.len(), true),
            None => {
                if self.input.is_eof() {
                    return Err(self.error(section.unterminated()));
                }
                let end = window.len() - partial_terminator_len(window, terminator);
                (&window[..end], end, false)
            }
        };

        if !content.is_empty() || (done && !self.state.section_emitted) {
            let depth = self.state.depth;
            match section {
                Section::Comment => {
                    trace!(depth, comment = %text(content), "comment");
                    handler.comment(depth, content);
                }
                Section::CData => {
                    trace!(depth, characters = %text(content), "cdata");
                    handler.cdata(depth, content);
                }
            }
            self.state.section_emitted = true;
        }

        if done {
            self.state.set_section(section, false);
        }
        self.input.consume(consumed);
        Ok(())
    }

    fn parse_declaration<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let scan = self.scan_complete(scan_declaration, ErrorKind::UnterminatedDeclaration)?;
        let window = self.input.window();
        let version = scan.version.slice(window);
        let encoding = scan.encoding.map(|span| span.slice(window));
        let standalone = scan.standalone.map(|span| span.slice(window));
        trace!(
            version = %text(version),
            encoding = %text(encoding.unwrap_or_default()),
            standalone = %text(standalone.unwrap_or_default()),
            "xml declaration"
        );
        handler.declaration(self.state.depth, version, encoding, standalone);
        self.input.consume(scan.consumed);
        Ok(())
    }

    fn parse_processing_instruction<H: XmlHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> Result<()> {
        let scan = self.scan_complete(
            scan_processing_instruction,
            ErrorKind::UnterminatedProcessingInstruction,
        )?;
        let window = self.input.window();
        let target = scan.target.slice(window);
        let data = scan.data.slice(window);
        trace!(target = %text(target), data = %text(data), "processing instruction");
        handler.processing_instruction(self.state.depth, target, data);
        self.input.consume(scan.consumed);
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let skipped = space_len(self.input.window());
        self.input.consume(skipped);
    }

    fn parse_entity_ref<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) {
        let entity = decode_entity_ref(self.input.window());
        trace!(characters = %text(entity.replacement), "entity ref");
        handler.char_entity_ref(self.state.depth, entity.replacement);
        self.input.consume(entity.consumed);
    }

    fn parse_characters<H: XmlHandler + ?Sized>(&mut self, handler: &mut H) {
        let window = self.input.window();
        let end = memchr2(b'<', b'&', window).unwrap_or(window.len());
        let characters = &window[..end];
        trace!(characters = %text(characters), "characters");
        handler.characters(self.state.depth, characters);
        self.input.consume(end);
    }
}
