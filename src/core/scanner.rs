//! Window scanning using memchr
//!
//! The scanners here look at the unconsumed window of the buffer and
//! recognize one bounded construct each. They never refill themselves:
//!
//! - `Ok(Some(scan))` - the construct is complete; `consumed` bytes can be skipped
//! - `Ok(None)` - the window ends before the construct does; refill and retry
//! - `Err(kind)` - the construct is malformed
//!
//! All positions are window-relative `Span`s.

use super::classify::{is_space, name_len, space_len};
use super::error::ErrorKind;
use super::span::{QName, Span};
use memchr::{memchr, memmem};

/// Outcome of scanning a construct that may straddle the window end
pub type Scan<T> = Result<Option<T>, ErrorKind>;

/// Cursor over a window
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or(&[])
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.pos += space_len(self.remaining());
    }

    /// Find next occurrence of a byte, as an absolute window offset
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.remaining()).map(|i| self.pos + i)
    }

    /// Read a name with at most one `prefix:` separator
    ///
    /// Returns `None` when the name runs into the end of the window, since it
    /// may continue after a refill.
    pub fn read_qname(&mut self) -> Scan<QName> {
        let start = self.pos;
        match self.peek() {
            None => return Ok(None),
            Some(b':') => return Err(ErrorKind::LeadingColon),
            Some(_) => {}
        }
        self.pos += name_len(self.remaining());
        let mut prefix_len = 0;
        if self.peek() == Some(b':') {
            prefix_len = self.pos - start;
            self.pos += 1;
            self.pos += name_len(self.remaining());
        }
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        if self.pos == start {
            return Err(ErrorKind::EmptyName);
        }
        Ok(Some(QName {
            qname: Span::between(start, self.pos),
            prefix_len,
        }))
    }
}

/// How a start tag (or its last attribute) ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClose {
    /// `>`: the element has content; depth increases
    Open,
    /// `/>`: no content and no end tag follows
    SelfClosing,
    /// More attributes or namespace declarations follow
    Pending,
}

/// Scan the optional whitespace and the closing `>`/`/>` of a start tag
pub fn scan_tag_close(scanner: &mut Scanner<'_>) -> Scan<TagClose> {
    scanner.skip_whitespace();
    match scanner.peek() {
        None => Ok(None),
        Some(b'>') => {
            scanner.advance(1);
            Ok(Some(TagClose::Open))
        }
        Some(b'/') => match scanner.peek_at(1) {
            None => Ok(None),
            Some(b'>') => {
                scanner.advance(2);
                Ok(Some(TagClose::SelfClosing))
            }
            Some(_) => Err(ErrorKind::ExpectedTagClose),
        },
        Some(_) => Ok(Some(TagClose::Pending)),
    }
}

/// A complete `<name` plus whatever closed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTagScan {
    pub name: QName,
    pub close: TagClose,
    pub consumed: usize,
}

/// Scan a start tag name; the window starts at `<`
pub fn scan_start_tag(window: &[u8]) -> Scan<StartTagScan> {
    let mut scanner = Scanner::new(window);
    scanner.advance(1);
    let Some(name) = scanner.read_qname()? else {
        return Ok(None);
    };
    let Some(close) = scan_tag_close(&mut scanner)? else {
        return Ok(None);
    };
    Ok(Some(StartTagScan {
        name,
        close,
        consumed: scanner.position(),
    }))
}

/// A complete `</name>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTagScan {
    pub name: QName,
    pub consumed: usize,
}

/// Scan an end tag; the window starts at `</`
pub fn scan_end_tag(window: &[u8]) -> Scan<EndTagScan> {
    let mut scanner = Scanner::new(window);
    scanner.advance(2);
    let Some(name) = scanner.read_qname()? else {
        return Ok(None);
    };
    scanner.skip_whitespace();
    match scanner.peek() {
        None => Ok(None),
        Some(b'>') => Ok(Some(EndTagScan {
            name,
            consumed: scanner.position() + 1,
        })),
        Some(_) => Err(ErrorKind::ExpectedTagClose),
    }
}

/// A complete `<?target data?>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiScan {
    pub target: Span,
    pub data: Span,
    pub consumed: usize,
}

/// Scan a processing instruction; the window starts at `<?`
pub fn scan_processing_instruction(window: &[u8]) -> Scan<PiScan> {
    let body = window.get(2..).unwrap_or(&[]);
    let Some(end) = memmem::find(body, b"?>") else {
        return Ok(None);
    };
    let end = end + 2;
    let target_end = 2 + name_len(&window[2..end]);
    if target_end == 2 {
        return Err(ErrorKind::EmptyName);
    }
    if target_end < end && !is_space(window[target_end]) {
        return Err(ErrorKind::ExpectedTagClose);
    }
    let data_start = target_end + space_len(&window[target_end..end]);
    Ok(Some(PiScan {
        target: Span::between(2, target_end),
        data: Span::between(data_start, end),
        consumed: end + 2,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_qname() {
        let mut scanner = Scanner::new(b"src:unit xmlns");
        let name = scanner.read_qname().unwrap().unwrap();
        assert_eq!(name.qname, Span::between(0, 8));
        assert_eq!(name.prefix_len, 3);
        assert_eq!(scanner.position(), 8);
    }

    #[test]
    fn test_read_qname_at_window_end_needs_more() {
        let mut scanner = Scanner::new(b"elem");
        assert!(scanner.read_qname().unwrap().is_none());
    }

    #[test]
    fn test_read_qname_errors() {
        assert!(matches!(
            Scanner::new(b":a>").read_qname(),
            Err(ErrorKind::LeadingColon)
        ));
        assert!(matches!(
            Scanner::new(b"=x").read_qname(),
            Err(ErrorKind::EmptyName)
        ));
    }

    #[test]
    fn test_start_tag_open() {
        let scan = scan_start_tag(b"<unit>text").unwrap().unwrap();
        assert_eq!(scan.name.qname.slice(b"<unit>text"), b"unit");
        assert_eq!(scan.close, TagClose::Open);
        assert_eq!(scan.consumed, 6);
    }

    #[test]
    fn test_start_tag_self_closing() {
        let scan = scan_start_tag(b"<br />").unwrap().unwrap();
        assert_eq!(scan.close, TagClose::SelfClosing);
        assert_eq!(scan.consumed, 6);
    }

    #[test]
    fn test_start_tag_pending_attributes() {
        let window = b"<a  href=\"x\">";
        let scan = scan_start_tag(window).unwrap().unwrap();
        assert_eq!(scan.close, TagClose::Pending);
        assert_eq!(&window[scan.consumed..], b"href=\"x\">");
    }

    #[test]
    fn test_start_tag_incomplete() {
        assert!(scan_start_tag(b"<uni").unwrap().is_none());
        assert!(scan_start_tag(b"<unit  ").unwrap().is_none());
        assert!(scan_start_tag(b"<unit/").unwrap().is_none());
    }

    #[test]
    fn test_start_tag_errors() {
        assert!(matches!(scan_start_tag(b"<:a>"), Err(ErrorKind::LeadingColon)));
        assert!(matches!(scan_start_tag(b"<>"), Err(ErrorKind::EmptyName)));
        assert!(matches!(
            scan_start_tag(b"<a / >"),
            Err(ErrorKind::ExpectedTagClose)
        ));
    }

    #[test]
    fn test_end_tag() {
        let window = b"</src:unit >rest";
        let scan = scan_end_tag(window).unwrap().unwrap();
        assert_eq!(scan.name.qname.slice(window), b"src:unit");
        assert_eq!(scan.name.local().slice(window), b"unit");
        assert_eq!(scan.consumed, 12);
        assert!(scan_end_tag(b"</unit").unwrap().is_none());
        assert!(matches!(scan_end_tag(b"</:a>"), Err(ErrorKind::LeadingColon)));
        assert!(matches!(
            scan_end_tag(b"</a b>"),
            Err(ErrorKind::ExpectedTagClose)
        ));
    }

    #[test]
    fn test_processing_instruction() {
        let window = b"<?xml-stylesheet href=\"a.xsl\"?>";
        let scan = scan_processing_instruction(window).unwrap().unwrap();
        assert_eq!(scan.target.slice(window), b"xml-stylesheet");
        assert_eq!(scan.data.slice(window), b"href=\"a.xsl\"");
        assert_eq!(scan.consumed, window.len());
    }

    #[test]
    fn test_processing_instruction_without_data() {
        let window = b"<?page?>";
        let scan = scan_processing_instruction(window).unwrap().unwrap();
        assert_eq!(scan.target.slice(window), b"page");
        assert!(scan.data.is_empty());
        assert!(scan_processing_instruction(b"<?page ").unwrap().is_none());
        assert!(matches!(
            scan_processing_instruction(b"<? x?>"),
            Err(ErrorKind::EmptyName)
        ));
    }
}
