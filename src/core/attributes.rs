//! Attribute, Namespace, and XML Declaration Scanning
//!
//! Attributes are scanned one at a time while a start tag is open, so each
//! scan also reports how the tag continues after the value.

use super::classify::is_space;
use super::error::ErrorKind;
use super::scanner::{scan_tag_close, Scan, Scanner, TagClose};
use super::span::{QName, Span};
use memchr::memmem;

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A complete `name="value"` and the tag continuation after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeScan {
    pub name: QName,
    /// Value without its delimiters
    pub value: Span,
    pub close: TagClose,
    pub consumed: usize,
}

impl AttributeScan {
    /// Prefix declared if this attribute is a namespace declaration
    ///
    /// `xmlns="..."` declares the default namespace (empty prefix),
    /// `xmlns:p="..."` declares `p`.
    pub fn namespace_prefix(&self, window: &[u8]) -> Option<Span> {
        if self.name.qname.slice(window) == b"xmlns" {
            Some(Span::new(self.name.qname.end(), 0))
        } else if self.name.prefix_len > 0 && self.name.prefix().slice(window) == b"xmlns" {
            Some(self.name.local())
        } else {
            None
        }
    }
}

/// Scan one attribute; the window starts at the attribute name
pub fn scan_attribute(window: &[u8]) -> Scan<AttributeScan> {
    let mut scanner = Scanner::new(window);
    let Some(name) = scanner.read_qname()? else {
        return Ok(None);
    };
    scanner.skip_whitespace();
    match scanner.peek() {
        None => return Ok(None),
        Some(b'=') => scanner.advance(1),
        Some(_) => {
            return Err(ErrorKind::MissingEquals {
                name: lossy(name.qname.slice(window)),
            })
        }
    }
    scanner.skip_whitespace();
    let delimiter = match scanner.peek() {
        None => return Ok(None),
        Some(quote @ (b'"' | b'\'')) => quote,
        Some(_) => {
            return Err(ErrorKind::MissingQuote {
                name: lossy(name.qname.slice(window)),
            })
        }
    };
    scanner.advance(1);
    let value_start = scanner.position();
    let Some(value_end) = scanner.find_byte(delimiter) else {
        return Ok(None);
    };
    scanner.set_position(value_end + 1);
    let Some(close) = scan_tag_close(&mut scanner)? else {
        return Ok(None);
    };
    Ok(Some(AttributeScan {
        name,
        value: Span::between(value_start, value_end),
        close,
        consumed: scanner.position(),
    }))
}

/// A complete `<?xml ...?>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationScan {
    pub version: Span,
    pub encoding: Option<Span>,
    pub standalone: Option<Span>,
    pub consumed: usize,
}

/// Read one `name="value"` pseudo-attribute inside the declaration body
fn scan_pseudo_attribute(
    scanner: &mut Scanner<'_>,
    body: &[u8],
) -> Result<Option<(Span, Span)>, ErrorKind> {
    scanner.skip_whitespace();
    if scanner.peek().is_none() {
        return Ok(None);
    }
    let name_start = scanner.position();
    let name_len = scanner
        .remaining()
        .iter()
        .position(|&b| b == b'=' || is_space(b))
        .unwrap_or(scanner.remaining().len());
    scanner.advance(name_len);
    let name = Span::between(name_start, scanner.position());
    scanner.skip_whitespace();
    if scanner.peek() != Some(b'=') {
        return Err(ErrorKind::InvalidDeclarationAttribute {
            name: lossy(name.slice(body)),
        });
    }
    scanner.advance(1);
    scanner.skip_whitespace();
    let delimiter = match scanner.peek() {
        Some(quote @ (b'"' | b'\'')) => quote,
        _ => {
            return Err(ErrorKind::MissingQuote {
                name: lossy(name.slice(body)),
            })
        }
    };
    scanner.advance(1);
    let value_start = scanner.position();
    let Some(value_end) = scanner.find_byte(delimiter) else {
        return Err(ErrorKind::MissingQuote {
            name: lossy(name.slice(body)),
        });
    };
    scanner.set_position(value_end + 1);
    Ok(Some((name, Span::between(value_start, value_end))))
}

/// Scan an XML declaration; the window starts at `<?xml `
///
/// `version` is required and first; `encoding` then `standalone` may follow,
/// in that order, each at most once.
pub fn scan_declaration(window: &[u8]) -> Scan<DeclarationScan> {
    let Some(end) = memmem::find(window, b"?>") else {
        return Ok(None);
    };
    let body = &window[..end];
    let mut scanner = Scanner::new(body);
    scanner.advance(b"<?xml".len());

    let version = match scan_pseudo_attribute(&mut scanner, body)? {
        Some((name, value)) if name.slice(body) == b"version" => value,
        _ => return Err(ErrorKind::MissingVersion),
    };

    let mut encoding = None;
    let mut standalone = None;
    while let Some((name, value)) = scan_pseudo_attribute(&mut scanner, body)? {
        match name.slice(body) {
            b"encoding" if encoding.is_none() && standalone.is_none() => encoding = Some(value),
            b"standalone" if standalone.is_none() => standalone = Some(value),
            other => {
                return Err(ErrorKind::InvalidDeclarationAttribute { name: lossy(other) })
            }
        }
    }

    Ok(Some(DeclarationScan {
        version,
        encoding,
        standalone,
        consumed: end + 2,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_attribute() {
        let window = b"id=\"test\" class='foo'>";
        let scan = scan_attribute(window).unwrap().unwrap();
        assert_eq!(scan.name.qname.slice(window), b"id");
        assert_eq!(scan.value.slice(window), b"test");
        assert_eq!(scan.close, TagClose::Pending);
        assert_eq!(&window[scan.consumed..], b"class='foo'>");

        let rest = &window[scan.consumed..];
        let scan = scan_attribute(rest).unwrap().unwrap();
        assert_eq!(scan.value.slice(rest), b"foo");
        assert_eq!(scan.close, TagClose::Open);
        assert_eq!(scan.consumed, rest.len());
    }

    #[test]
    fn test_whitespace_around_equals() {
        let window = b"id  =  \"test\"  />";
        let scan = scan_attribute(window).unwrap().unwrap();
        assert_eq!(scan.value.slice(window), b"test");
        assert_eq!(scan.close, TagClose::SelfClosing);
    }

    #[test]
    fn test_prefixed_attribute() {
        let window = b"xlink:href=\"#a\">";
        let scan = scan_attribute(window).unwrap().unwrap();
        assert_eq!(scan.name.prefix().slice(window), b"xlink");
        assert_eq!(scan.name.local().slice(window), b"href");
        assert!(scan.namespace_prefix(window).is_none());
    }

    #[test]
    fn test_namespace_declarations() {
        let window = b"xmlns:p=\"urn:x\">";
        let scan = scan_attribute(window).unwrap().unwrap();
        let prefix = scan.namespace_prefix(window).unwrap();
        assert_eq!(prefix.slice(window), b"p");
        assert_eq!(scan.value.slice(window), b"urn:x");

        let window = b"xmlns=\"urn:default\" a=\"1\">";
        let scan = scan_attribute(window).unwrap().unwrap();
        assert!(scan.namespace_prefix(window).unwrap().is_empty());
        assert_eq!(scan.close, TagClose::Pending);
    }

    #[test]
    fn test_value_keeps_other_quote() {
        let window = b"q='say \"hi\"'>";
        let scan = scan_attribute(window).unwrap().unwrap();
        assert_eq!(scan.value.slice(window), b"say \"hi\"");
    }

    #[test]
    fn test_incomplete_attribute() {
        assert!(scan_attribute(b"id").unwrap().is_none());
        assert!(scan_attribute(b"id=").unwrap().is_none());
        assert!(scan_attribute(b"id=\"te").unwrap().is_none());
        assert!(scan_attribute(b"id=\"test\"").unwrap().is_none());
    }

    #[test]
    fn test_malformed_attribute() {
        assert!(matches!(
            scan_attribute(b"b c=\"1\">"),
            Err(ErrorKind::MissingEquals { name }) if name == "b"
        ));
        assert!(matches!(
            scan_attribute(b"b=1>"),
            Err(ErrorKind::MissingQuote { .. })
        ));
        assert!(matches!(scan_attribute(b":b=\"1\">"), Err(ErrorKind::LeadingColon)));
    }

    #[test]
    fn test_full_declaration() {
        let window = b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<unit/>";
        let scan = scan_declaration(window).unwrap().unwrap();
        assert_eq!(scan.version.slice(window), b"1.0");
        assert_eq!(scan.encoding.unwrap().slice(window), b"UTF-8");
        assert_eq!(scan.standalone.unwrap().slice(window), b"yes");
        assert_eq!(&window[scan.consumed..], b"\n<unit/>");
    }

    #[test]
    fn test_version_only_declaration() {
        let window = b"<?xml version='1.0'?>";
        let scan = scan_declaration(window).unwrap().unwrap();
        assert_eq!(scan.version.slice(window), b"1.0");
        assert!(scan.encoding.is_none());
        assert!(scan.standalone.is_none());
    }

    #[test]
    fn test_standalone_without_encoding() {
        let window = b"<?xml version=\"1.0\" standalone=\"no\" ?>";
        let scan = scan_declaration(window).unwrap().unwrap();
        assert!(scan.encoding.is_none());
        assert_eq!(scan.standalone.unwrap().slice(window), b"no");
    }

    #[test]
    fn test_declaration_ordering_errors() {
        assert!(matches!(
            scan_declaration(b"<?xml encoding=\"UTF-8\" version=\"1.0\"?>"),
            Err(ErrorKind::MissingVersion)
        ));
        assert!(matches!(
            scan_declaration(b"<?xml version=\"1.0\" standalone=\"yes\" encoding=\"UTF-8\"?>"),
            Err(ErrorKind::InvalidDeclarationAttribute { name }) if name == "encoding"
        ));
        assert!(matches!(
            scan_declaration(b"<?xml version=\"1.0\" lang=\"en\"?>"),
            Err(ErrorKind::InvalidDeclarationAttribute { name }) if name == "lang"
        ));
        assert!(matches!(
            scan_declaration(b"<?xml version=1.0?>"),
            Err(ErrorKind::MissingQuote { .. })
        ));
    }

    #[test]
    fn test_declaration_incomplete() {
        assert!(scan_declaration(b"<?xml version=\"1.0\"").unwrap().is_none());
    }
}
