//! SAX Collector
//!
//! Implements XmlHandler by copying every event out of the parser's buffer.
//! This is the copy-on-emit path: one allocation per span, in exchange for
//! events that outlive the callback.

use super::events::{Event, EventKind, OwnedEvent};
use super::handler::XmlHandler;
use crate::core::error::Result;
use crate::parser::XmlParser;

/// Collector that gathers owned events during parsing
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<OwnedEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(256),
        }
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<OwnedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[OwnedEvent] {
        &self.events
    }

    /// Number of collected events of one kind
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Concatenated text of character, entity, and CDATA events
    pub fn text(&self) -> Vec<u8> {
        let mut text = Vec::new();
        for event in &self.events {
            match event {
                OwnedEvent::Characters { characters, .. }
                | OwnedEvent::CharEntityRef { characters, .. }
                | OwnedEvent::CData { characters, .. } => text.extend_from_slice(characters),
                _ => {}
            }
        }
        text
    }

    /// Concatenated content of every comment fragment
    pub fn comment_text(&self) -> Vec<u8> {
        let mut text = Vec::new();
        for event in &self.events {
            if let OwnedEvent::Comment { comment, .. } = event {
                text.extend_from_slice(comment);
            }
        }
        text
    }

    fn push(&mut self, event: Event<'_>) {
        self.events.push(event.to_owned_event());
    }
}

impl XmlHandler for EventCollector {
    fn start_document(&mut self, depth: i32) {
        self.push(Event::StartDocument { depth });
    }

    fn end_document(&mut self, depth: i32) {
        self.push(Event::EndDocument { depth });
    }

    fn start_tag(&mut self, depth: i32, qname: &[u8], prefix: &[u8], local_name: &[u8]) {
        self.push(Event::StartTag {
            depth,
            qname,
            prefix,
            local_name,
        });
    }

    fn attribute(
        &mut self,
        depth: i32,
        qname: &[u8],
        prefix: &[u8],
        local_name: &[u8],
        value: &[u8],
    ) {
        self.push(Event::Attribute {
            depth,
            qname,
            prefix,
            local_name,
            value,
        });
    }

    fn namespace(&mut self, depth: i32, prefix: &[u8], uri: &[u8]) {
        self.push(Event::Namespace { depth, prefix, uri });
    }

    fn end_tag(&mut self, depth: i32, prefix: &[u8], qname: &[u8], local_name: &[u8]) {
        self.push(Event::EndTag {
            depth,
            prefix,
            qname,
            local_name,
        });
    }

    fn characters(&mut self, depth: i32, characters: &[u8]) {
        self.push(Event::Characters { depth, characters });
    }

    fn cdata(&mut self, depth: i32, characters: &[u8]) {
        self.push(Event::CData { depth, characters });
    }

    fn char_entity_ref(&mut self, depth: i32, characters: &[u8]) {
        self.push(Event::CharEntityRef { depth, characters });
    }

    fn comment(&mut self, depth: i32, comment: &[u8]) {
        self.push(Event::Comment { depth, comment });
    }

    fn declaration(
        &mut self,
        depth: i32,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
    ) {
        self.push(Event::Declaration {
            depth,
            version,
            encoding,
            standalone,
        });
    }

    fn processing_instruction(&mut self, depth: i32, target: &[u8], data: &[u8]) {
        self.push(Event::ProcessingInstruction {
            depth,
            target,
            data,
        });
    }
}

/// Parse an in-memory document and return its owned events
pub fn parse_events(input: &[u8]) -> Result<Vec<OwnedEvent>> {
    let mut collector = EventCollector::new();
    XmlParser::new(input).parse(&mut collector)?;
    Ok(collector.take_events())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_parse() {
        let events = parse_events(b"<root><child/></root>").unwrap();

        // start doc, start root, start child, end root, end doc
        assert_eq!(events.len(), 5);
        assert_eq!(events[1].kind(), EventKind::StartTag);
        assert_eq!(events[2].kind(), EventKind::StartTag);
        assert_eq!(events[3].kind(), EventKind::EndTag);
    }

    #[test]
    fn test_with_attributes() {
        let mut collector = EventCollector::new();
        XmlParser::new(&b"<root id=\"1\" name=\"test\"/>"[..])
            .parse(&mut collector)
            .unwrap();

        assert_eq!(collector.count(EventKind::Attribute), 2);
        assert_eq!(collector.count(EventKind::EndTag), 0);
    }

    #[test]
    fn test_text_concatenation() {
        let mut collector = EventCollector::new();
        XmlParser::new(&b"<p>a &lt;b&gt; &amp; c</p>"[..])
            .parse(&mut collector)
            .unwrap();

        assert_eq!(collector.text(), b"a <b> & c");
    }
}
