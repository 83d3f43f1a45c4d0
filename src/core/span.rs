//! Span - offset and length into the buffer window
//!
//! Scanners report positions relative to the start of the window they were
//! given rather than slices, so a refill between two scanning attempts never
//! leaves a dangling reference. Slices are taken only once scanning is done.

/// A span referencing a portion of the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset from the start of the window
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    #[inline]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Span covering `start..end`
    #[inline]
    pub const fn between(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end - start,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Extract the byte slice from the window
    #[inline]
    pub fn slice<'a>(&self, window: &'a [u8]) -> &'a [u8] {
        window.get(self.offset..self.end()).unwrap_or(&[])
    }
}

/// A possibly prefixed name: `prefix:local` or bare `local`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QName {
    /// The whole qualified name
    pub qname: Span,
    /// Length of the prefix, 0 when unprefixed
    pub prefix_len: usize,
}

impl QName {
    #[inline]
    pub fn prefix(&self) -> Span {
        Span::new(self.qname.offset, self.prefix_len)
    }

    #[inline]
    pub fn local(&self) -> Span {
        if self.prefix_len == 0 {
            self.qname
        } else {
            Span::between(self.qname.offset + self.prefix_len + 1, self.qname.end())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slice() {
        let window = b"<root>";
        let span = Span::between(1, 5);
        assert_eq!(span.slice(window), b"root");
        assert_eq!(span.end(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_out_of_range_span_is_empty() {
        assert_eq!(Span::new(4, 10).slice(b"abc"), b"");
    }

    #[test]
    fn test_qname_parts() {
        let window = b"<src:unit>";
        let name = QName {
            qname: Span::between(1, 9),
            prefix_len: 3,
        };
        assert_eq!(name.qname.slice(window), b"src:unit");
        assert_eq!(name.prefix().slice(window), b"src");
        assert_eq!(name.local().slice(window), b"unit");

        let bare = QName {
            qname: Span::between(1, 5),
            prefix_len: 0,
        };
        assert_eq!(bare.prefix().slice(b"<unit>"), b"");
        assert_eq!(bare.local().slice(b"<unit>"), b"unit");
    }
}
