//! XML Part Statistics
//!
//! Counts how many events of each kind a document produces.

use std::io::{self, Write};

use super::{group_thousands, value_width};
use crate::sax::events::EventKind;
use crate::sax::handler::XmlHandler;

/// Event totals, one counter per `EventKind`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct XmlStats {
    counts: [u64; EventKind::ALL.len()],
}

impl XmlStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn bump(&mut self, kind: EventKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        self.counts[kind.index()]
    }

    /// Write the markdown report
    pub fn write_report<W: Write>(&self, out: &mut W, total_bytes: u64) -> io::Result<()> {
        let width = value_width(total_bytes);
        let rows = [
            ("XML Namespaces", EventKind::Namespace),
            ("attributes    ", EventKind::Attribute),
            ("Comments      ", EventKind::Comment),
            ("CDATA         ", EventKind::CData),
            ("Declarations  ", EventKind::Declaration),
            ("PI's          ", EventKind::ProcessingInstruction),
            ("End Tags      ", EventKind::EndTag),
            ("Start Tags    ", EventKind::StartTag),
            ("CER's         ", EventKind::CharEntityRef),
            ("Non CER's     ", EventKind::Characters),
        ];

        writeln!(out, "# XMLStats:")?;
        writeln!(out, "| Measure        | {:>w$}", "Value |", w = width + 2)?;
        writeln!(out, "|:---------------|-{:->w$}", ":|", w = width + 2)?;
        for (label, kind) in rows {
            let value = group_thousands(self.count(kind));
            writeln!(out, "| {} | {:>w$} |", label, value, w = width)?;
        }
        writeln!(out)
    }
}

impl XmlHandler for XmlStats {
    fn start_document(&mut self, _depth: i32) {
        self.bump(EventKind::StartDocument);
    }

    fn end_document(&mut self, _depth: i32) {
        self.bump(EventKind::EndDocument);
    }

    fn start_tag(&mut self, _depth: i32, _qname: &[u8], _prefix: &[u8], _local_name: &[u8]) {
        self.bump(EventKind::StartTag);
    }

    fn attribute(
        &mut self,
        _depth: i32,
        _qname: &[u8],
        _prefix: &[u8],
        _local_name: &[u8],
        _value: &[u8],
    ) {
        self.bump(EventKind::Attribute);
    }

    fn namespace(&mut self, _depth: i32, _prefix: &[u8], _uri: &[u8]) {
        self.bump(EventKind::Namespace);
    }

    fn end_tag(&mut self, _depth: i32, _prefix: &[u8], _qname: &[u8], _local_name: &[u8]) {
        self.bump(EventKind::EndTag);
    }

    fn characters(&mut self, _depth: i32, _characters: &[u8]) {
        self.bump(EventKind::Characters);
    }

    fn cdata(&mut self, _depth: i32, _characters: &[u8]) {
        self.bump(EventKind::CData);
    }

    fn char_entity_ref(&mut self, _depth: i32, _characters: &[u8]) {
        self.bump(EventKind::CharEntityRef);
    }

    fn comment(&mut self, _depth: i32, _comment: &[u8]) {
        self.bump(EventKind::Comment);
    }

    fn declaration(
        &mut self,
        _depth: i32,
        _version: &[u8],
        _encoding: Option<&[u8]>,
        _standalone: Option<&[u8]>,
    ) {
        self.bump(EventKind::Declaration);
    }

    fn processing_instruction(&mut self, _depth: i32, _target: &[u8], _data: &[u8]) {
        self.bump(EventKind::ProcessingInstruction);
    }
}
