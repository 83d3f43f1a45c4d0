//! SAX Event Types
//!
//! `Event` is the tagged form of the `XmlHandler` callbacks. It borrows the
//! parser's buffer, so it lives only as long as the callback that built it.
//! `OwnedEvent` is the copy-on-emit form for callers that need to keep events.

use super::handler::XmlHandler;

/// The kind of a parse event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    StartDocument,
    EndDocument,
    StartTag,
    Attribute,
    Namespace,
    EndTag,
    Characters,
    CData,
    CharEntityRef,
    Comment,
    Declaration,
    ProcessingInstruction,
}

impl EventKind {
    /// All kinds, in callback declaration order
    pub const ALL: [EventKind; 12] = [
        EventKind::StartDocument,
        EventKind::EndDocument,
        EventKind::StartTag,
        EventKind::Attribute,
        EventKind::Namespace,
        EventKind::EndTag,
        EventKind::Characters,
        EventKind::CData,
        EventKind::CharEntityRef,
        EventKind::Comment,
        EventKind::Declaration,
        EventKind::ProcessingInstruction,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A parse event borrowing the live buffer window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    StartDocument {
        depth: i32,
    },
    EndDocument {
        depth: i32,
    },
    StartTag {
        depth: i32,
        qname: &'a [u8],
        prefix: &'a [u8],
        local_name: &'a [u8],
    },
    Attribute {
        depth: i32,
        qname: &'a [u8],
        prefix: &'a [u8],
        local_name: &'a [u8],
        value: &'a [u8],
    },
    Namespace {
        depth: i32,
        prefix: &'a [u8],
        uri: &'a [u8],
    },
    EndTag {
        depth: i32,
        prefix: &'a [u8],
        qname: &'a [u8],
        local_name: &'a [u8],
    },
    Characters {
        depth: i32,
        characters: &'a [u8],
    },
    CData {
        depth: i32,
        characters: &'a [u8],
    },
    CharEntityRef {
        depth: i32,
        characters: &'a [u8],
    },
    Comment {
        depth: i32,
        comment: &'a [u8],
    },
    Declaration {
        depth: i32,
        version: &'a [u8],
        encoding: Option<&'a [u8]>,
        standalone: Option<&'a [u8]>,
    },
    ProcessingInstruction {
        depth: i32,
        target: &'a [u8],
        data: &'a [u8],
    },
}

impl<'a> Event<'a> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StartDocument { .. } => EventKind::StartDocument,
            Event::EndDocument { .. } => EventKind::EndDocument,
            Event::StartTag { .. } => EventKind::StartTag,
            Event::Attribute { .. } => EventKind::Attribute,
            Event::Namespace { .. } => EventKind::Namespace,
            Event::EndTag { .. } => EventKind::EndTag,
            Event::Characters { .. } => EventKind::Characters,
            Event::CData { .. } => EventKind::CData,
            Event::CharEntityRef { .. } => EventKind::CharEntityRef,
            Event::Comment { .. } => EventKind::Comment,
            Event::Declaration { .. } => EventKind::Declaration,
            Event::ProcessingInstruction { .. } => EventKind::ProcessingInstruction,
        }
    }

    pub fn depth(&self) -> i32 {
        match *self {
            Event::StartDocument { depth }
            | Event::EndDocument { depth }
            | Event::StartTag { depth, .. }
            | Event::Attribute { depth, .. }
            | Event::Namespace { depth, .. }
            | Event::EndTag { depth, .. }
            | Event::Characters { depth, .. }
            | Event::CData { depth, .. }
            | Event::CharEntityRef { depth, .. }
            | Event::Comment { depth, .. }
            | Event::Declaration { depth, .. }
            | Event::ProcessingInstruction { depth, .. } => depth,
        }
    }

    /// Copy the borrowed spans out of the buffer
    pub fn to_owned_event(&self) -> OwnedEvent {
        let own = |bytes: &[u8]| bytes.to_vec();
        match *self {
            Event::StartDocument { depth } => OwnedEvent::StartDocument { depth },
            Event::EndDocument { depth } => OwnedEvent::EndDocument { depth },
            Event::StartTag {
                depth,
                qname,
                prefix,
                local_name,
            } => OwnedEvent::StartTag {
                depth,
                qname: own(qname),
                prefix: own(prefix),
                local_name: own(local_name),
            },
            Event::Attribute {
                depth,
                qname,
                prefix,
                local_name,
                value,
            } => OwnedEvent::Attribute {
                depth,
                qname: own(qname),
                prefix: own(prefix),
                local_name: own(local_name),
                value: own(value),
            },
            Event::Namespace { depth, prefix, uri } => OwnedEvent::Namespace {
                depth,
                prefix: own(prefix),
                uri: own(uri),
            },
            Event::EndTag {
                depth,
                prefix,
                qname,
                local_name,
            } => OwnedEvent::EndTag {
                depth,
                prefix: own(prefix),
                qname: own(qname),
                local_name: own(local_name),
            },
            Event::Characters { depth, characters } => OwnedEvent::Characters {
                depth,
                characters: own(characters),
            },
            Event::CData { depth, characters } => OwnedEvent::CData {
                depth,
                characters: own(characters),
            },
            Event::CharEntityRef { depth, characters } => OwnedEvent::CharEntityRef {
                depth,
                characters: own(characters),
            },
            Event::Comment { depth, comment } => OwnedEvent::Comment {
                depth,
                comment: own(comment),
            },
            Event::Declaration {
                depth,
                version,
                encoding,
                standalone,
            } => OwnedEvent::Declaration {
                depth,
                version: own(version),
                encoding: encoding.map(own),
                standalone: standalone.map(own),
            },
            Event::ProcessingInstruction {
                depth,
                target,
                data,
            } => OwnedEvent::ProcessingInstruction {
                depth,
                target: own(target),
                data: own(data),
            },
        }
    }
}

/// Owned version of `Event` for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEvent {
    StartDocument {
        depth: i32,
    },
    EndDocument {
        depth: i32,
    },
    StartTag {
        depth: i32,
        qname: Vec<u8>,
        prefix: Vec<u8>,
        local_name: Vec<u8>,
    },
    Attribute {
        depth: i32,
        qname: Vec<u8>,
        prefix: Vec<u8>,
        local_name: Vec<u8>,
        value: Vec<u8>,
    },
    Namespace {
        depth: i32,
        prefix: Vec<u8>,
        uri: Vec<u8>,
    },
    EndTag {
        depth: i32,
        prefix: Vec<u8>,
        qname: Vec<u8>,
        local_name: Vec<u8>,
    },
    Characters {
        depth: i32,
        characters: Vec<u8>,
    },
    CData {
        depth: i32,
        characters: Vec<u8>,
    },
    CharEntityRef {
        depth: i32,
        characters: Vec<u8>,
    },
    Comment {
        depth: i32,
        comment: Vec<u8>,
    },
    Declaration {
        depth: i32,
        version: Vec<u8>,
        encoding: Option<Vec<u8>>,
        standalone: Option<Vec<u8>>,
    },
    ProcessingInstruction {
        depth: i32,
        target: Vec<u8>,
        data: Vec<u8>,
    },
}

impl OwnedEvent {
    /// Borrow back as an `Event`
    pub fn as_event(&self) -> Event<'_> {
        match self {
            OwnedEvent::StartDocument { depth } => Event::StartDocument { depth: *depth },
            OwnedEvent::EndDocument { depth } => Event::EndDocument { depth: *depth },
            OwnedEvent::StartTag {
                depth,
                qname,
                prefix,
                local_name,
            } => Event::StartTag {
                depth: *depth,
                qname,
                prefix,
                local_name,
            },
            OwnedEvent::Attribute {
                depth,
                qname,
                prefix,
                local_name,
                value,
            } => Event::Attribute {
                depth: *depth,
                qname,
                prefix,
                local_name,
                value,
            },
            OwnedEvent::Namespace { depth, prefix, uri } => Event::Namespace {
                depth: *depth,
                prefix,
                uri,
            },
            OwnedEvent::EndTag {
                depth,
                prefix,
                qname,
                local_name,
            } => Event::EndTag {
                depth: *depth,
                prefix,
                qname,
                local_name,
            },
            OwnedEvent::Characters { depth, characters } => Event::Characters {
                depth: *depth,
                characters,
            },
            OwnedEvent::CData { depth, characters } => Event::CData {
                depth: *depth,
                characters,
            },
            OwnedEvent::CharEntityRef { depth, characters } => Event::CharEntityRef {
                depth: *depth,
                characters,
            },
            OwnedEvent::Comment { depth, comment } => Event::Comment {
                depth: *depth,
                comment,
            },
            OwnedEvent::Declaration {
                depth,
                version,
                encoding,
                standalone,
            } => Event::Declaration {
                depth: *depth,
                version,
                encoding: encoding.as_deref(),
                standalone: standalone.as_deref(),
            },
            OwnedEvent::ProcessingInstruction {
                depth,
                target,
                data,
            } => Event::ProcessingInstruction {
                depth: *depth,
                target,
                data,
            },
        }
    }

    pub fn kind(&self) -> EventKind {
        self.as_event().kind()
    }

    pub fn depth(&self) -> i32 {
        self.as_event().depth()
    }
}

/// Adapter turning a closure over `Event` into an `XmlHandler`
pub struct EventFn<F>(pub F);

impl<F: FnMut(Event<'_>)> XmlHandler for EventFn<F> {
    fn start_document(&mut self, depth: i32) {
        (self.0)(Event::StartDocument { depth })
    }

    fn end_document(&mut self, depth: i32) {
        (self.0)(Event::EndDocument { depth })
    }

    fn start_tag(&mut self, depth: i32, qname: &[u8], prefix: &[u8], local_name: &[u8]) {
        (self.0)(Event::StartTag {
            depth,
            qname,
            prefix,
            local_name,
        })
    }

    fn attribute(
        &mut self,
        depth: i32,
        qname: &[u8],
        prefix: &[u8],
        local_name: &[u8],
        value: &[u8],
    ) {
        (self.0)(Event::Attribute {
            depth,
            qname,
            prefix,
            local_name,
            value,
        })
    }

    fn namespace(&mut self, depth: i32, prefix: &[u8], uri: &[u8]) {
        (self.0)(Event::Namespace { depth, prefix, uri })
    }

    fn end_tag(&mut self, depth: i32, prefix: &[u8], qname: &[u8], local_name: &[u8]) {
        (self.0)(Event::EndTag {
            depth,
            prefix,
            qname,
            local_name,
        })
    }

    fn characters(&mut self, depth: i32, characters: &[u8]) {
        (self.0)(Event::Characters { depth, characters })
    }

    fn cdata(&mut self, depth: i32, characters: &[u8]) {
        (self.0)(Event::CData { depth, characters })
    }

    fn char_entity_ref(&mut self, depth: i32, characters: &[u8]) {
        (self.0)(Event::CharEntityRef { depth, characters })
    }

    fn comment(&mut self, depth: i32, comment: &[u8]) {
        (self.0)(Event::Comment { depth, comment })
    }

    fn declaration(
        &mut self,
        depth: i32,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
    ) {
        (self.0)(Event::Declaration {
            depth,
            version,
            encoding,
            standalone,
        })
    }

    fn processing_instruction(&mut self, depth: i32, target: &[u8], data: &[u8]) {
        (self.0)(Event::ProcessingInstruction {
            depth,
            target,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_depth() {
        let event = Event::StartTag {
            depth: 2,
            qname: b"src:unit",
            prefix: b"src",
            local_name: b"unit",
        };
        assert_eq!(event.kind(), EventKind::StartTag);
        assert_eq!(event.depth(), 2);
    }

    #[test]
    fn test_owned_round_trip() {
        let event = Event::Declaration {
            depth: 0,
            version: b"1.0",
            encoding: Some(&b"UTF-8"[..]),
            standalone: None,
        };
        let owned = event.to_owned_event();
        assert_eq!(owned.as_event(), event);
        assert_eq!(owned.kind(), EventKind::Declaration);
    }

    #[test]
    fn test_kind_index_matches_all() {
        for (i, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_event_fn_adapter() {
        let mut kinds = Vec::new();
        {
            let mut handler = EventFn(|event: Event<'_>| kinds.push(event.kind()));
            handler.start_document(0);
            handler.namespace(0, b"", b"urn:x");
            handler.end_document(0);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::StartDocument,
                EventKind::Namespace,
                EventKind::EndDocument
            ]
        );
    }
}
