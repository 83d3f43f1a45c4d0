//! Character Entity References
//!
//! Only the three literal forms `&lt;`, `&gt;`, and `&amp;` are decoded.
//! Anything else starting with `&` (numeric references, `&quot;`, unknown
//! names, a bare ampersand) is a literal `&` that consumes exactly one byte;
//! the bytes after it are scanned again as ordinary character data.

/// A recognized entity reference at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    /// Replacement text
    pub replacement: &'static [u8],
    /// Bytes of input consumed, including `&` and `;`
    pub consumed: usize,
}

/// Literal ampersand fallback
const AMPERSAND: EntityRef = EntityRef {
    replacement: b"&",
    consumed: 1,
};

/// Decode the entity reference at the start of `input`
///
/// `input` must start with `&`. Callers guarantee at least five bytes of
/// lookahead unless the stream has ended.
#[inline]
pub fn decode_entity_ref(input: &[u8]) -> EntityRef {
    debug_assert_eq!(input.first(), Some(&b'&'));
    let entity = |replacement: &'static [u8], consumed| EntityRef {
        replacement,
        consumed,
    };
    match input.get(1..) {
        Some(rest) if rest.starts_with(b"lt;") => entity(b"<", 4),
        Some(rest) if rest.starts_with(b"gt;") => entity(b">", 4),
        Some(rest) if rest.starts_with(b"amp;") => entity(b"&", 5),
        _ => AMPERSAND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_entities() {
        assert_eq!(decode_entity_ref(b"&lt;b").replacement, b"<");
        assert_eq!(decode_entity_ref(b"&lt;b").consumed, 4);
        assert_eq!(decode_entity_ref(b"&gt; ").replacement, b">");
        assert_eq!(decode_entity_ref(b"&amp; c").replacement, b"&");
        assert_eq!(decode_entity_ref(b"&amp; c").consumed, 5);
    }

    #[test]
    fn test_unknown_is_literal_ampersand() {
        assert_eq!(decode_entity_ref(b"&foo;"), AMPERSAND);
        assert_eq!(decode_entity_ref(b"&quot;"), AMPERSAND);
        assert_eq!(decode_entity_ref(b"&#60;"), AMPERSAND);
        assert_eq!(decode_entity_ref(b"&lt"), AMPERSAND);
        assert_eq!(decode_entity_ref(b"&"), AMPERSAND);
    }
}
