//! Construct selection
//!
//! Each loop iteration computes a `LexicalState` from the parser flags, then
//! picks exactly one `Construct` from it and the first bytes of the window.
//! The order of the markup checks matters: `<!--` and `<![CDATA[` before
//! `<?xml `, which is before any other `<?`, which is before `</` and `<`.

use crate::core::classify::is_space;

/// Where the cursor sits relative to the document structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalState {
    /// Between a start tag's name and its closing `>`/`/>`
    InOpenTag,
    /// Inside a comment whose terminator has not been seen
    InComment,
    /// Inside a CDATA section whose terminator has not been seen
    InCData,
    /// Before the root start tag or after the root end tag
    Outside,
    /// Element content
    Content,
}

impl LexicalState {
    pub fn new(in_tag: bool, in_comment: bool, in_cdata: bool, depth: i32) -> Self {
        if in_tag {
            LexicalState::InOpenTag
        } else if in_comment {
            LexicalState::InComment
        } else if in_cdata {
            LexicalState::InCData
        } else if depth == 0 {
            LexicalState::Outside
        } else {
            LexicalState::Content
        }
    }
}

/// The production handled by one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// An attribute or `xmlns[:prefix]` declaration of the open start tag
    Attribute,
    Comment,
    CData,
    /// Exactly `<?xml `
    Declaration,
    ProcessingInstruction,
    EndTag,
    StartTag,
    /// Whitespace outside the root element, discarded
    Whitespace,
    EntityRef,
    Characters,
}

/// Select the construct starting at the front of `window`
pub fn select(state: LexicalState, window: &[u8]) -> Construct {
    match state {
        LexicalState::InOpenTag => Construct::Attribute,
        LexicalState::InComment => Construct::Comment,
        LexicalState::InCData => Construct::CData,
        LexicalState::Outside | LexicalState::Content => match window {
            [b'<', b'!', b'-', b'-', ..] => Construct::Comment,
            [b'<', b'!', b'[', b'C', b'D', b'A', b'T', b'A', b'[', ..] => Construct::CData,
            [b'<', b'?', b'x', b'm', b'l', b' ', ..] => Construct::Declaration,
            [b'<', b'?', ..] => Construct::ProcessingInstruction,
            [b'<', b'/', ..] => Construct::EndTag,
            [b'<', ..] => Construct::StartTag,
            [b, ..] if state == LexicalState::Outside && is_space(*b) => Construct::Whitespace,
            [b'&', ..] => Construct::EntityRef,
            _ => Construct::Characters,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_state_priority() {
        assert_eq!(LexicalState::new(true, false, false, 0), LexicalState::InOpenTag);
        assert_eq!(LexicalState::new(false, true, true, 3), LexicalState::InComment);
        assert_eq!(LexicalState::new(false, false, true, 3), LexicalState::InCData);
        assert_eq!(LexicalState::new(false, false, false, 0), LexicalState::Outside);
        assert_eq!(LexicalState::new(false, false, false, 2), LexicalState::Content);
    }

    #[test]
    fn test_markup_selection() {
        let content = LexicalState::Content;
        assert_eq!(select(content, b"<!-- c -->"), Construct::Comment);
        assert_eq!(select(content, b"<![CDATA[x]]>"), Construct::CData);
        assert_eq!(select(content, b"<?xml version"), Construct::Declaration);
        assert_eq!(select(content, b"<?xml-stylesheet"), Construct::ProcessingInstruction);
        assert_eq!(select(content, b"<?php "), Construct::ProcessingInstruction);
        assert_eq!(select(content, b"</a>"), Construct::EndTag);
        assert_eq!(select(content, b"<a>"), Construct::StartTag);
        assert_eq!(select(content, b"<!DOCTYPE"), Construct::StartTag);
    }

    #[test]
    fn test_text_selection() {
        assert_eq!(select(LexicalState::Outside, b"\n<a>"), Construct::Whitespace);
        assert_eq!(select(LexicalState::Content, b"\n<a>"), Construct::Characters);
        assert_eq!(select(LexicalState::Outside, b"stray"), Construct::Characters);
        assert_eq!(select(LexicalState::Content, b"&lt;"), Construct::EntityRef);
    }

    #[test]
    fn test_in_construct_selection() {
        assert_eq!(select(LexicalState::InOpenTag, b"<!--"), Construct::Attribute);
        assert_eq!(select(LexicalState::InComment, b"<a>"), Construct::Comment);
        assert_eq!(select(LexicalState::InCData, b"-->"), Construct::CData);
    }
}
