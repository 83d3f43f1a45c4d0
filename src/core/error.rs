//! Parse errors
//!
//! Every error is fatal: the parser is consumed by `parse()` and no event
//! follows the one that preceded the failure.

use std::io;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// The condition that stopped the parse
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The input source failed while refilling the buffer
    #[error("file input error: {0}")]
    Io(#[from] io::Error),

    #[error("unterminated XML comment")]
    UnterminatedComment,

    #[error("unterminated CDATA section")]
    UnterminatedCData,

    #[error("incomplete element start tag")]
    UnterminatedTag,

    #[error("incomplete element end tag")]
    UnterminatedEndTag,

    #[error("incomplete attribute")]
    UnterminatedAttribute,

    #[error("incomplete namespace")]
    UnterminatedNamespace,

    #[error("incomplete XML declaration")]
    UnterminatedDeclaration,

    #[error("unterminated processing instruction")]
    UnterminatedProcessingInstruction,

    /// A name was required but none was present
    #[error("empty name")]
    EmptyName,

    /// A name started with the prefix separator
    #[error("invalid name: leading ':'")]
    LeadingColon,

    #[error("attribute {name} missing =")]
    MissingEquals { name: String },

    /// Value not opened with `"`/`'`, or not closed by the same delimiter
    #[error("attribute {name} missing delimiter")]
    MissingQuote { name: String },

    /// A tag body held something other than whitespace before `>`
    #[error("expected '>' to close tag")]
    ExpectedTagClose,

    #[error("missing required first attribute version in XML declaration")]
    MissingVersion,

    /// Unknown, repeated, or out-of-order pseudo-attribute
    #[error("invalid attribute {name} in XML declaration")]
    InvalidDeclarationAttribute { name: String },
}

impl ErrorKind {
    /// Whether the condition is a premature end of input
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnterminatedComment
                | ErrorKind::UnterminatedCData
                | ErrorKind::UnterminatedTag
                | ErrorKind::UnterminatedEndTag
                | ErrorKind::UnterminatedAttribute
                | ErrorKind::UnterminatedNamespace
                | ErrorKind::UnterminatedDeclaration
                | ErrorKind::UnterminatedProcessingInstruction
        )
    }
}

/// A fatal parse error with the stream position and nesting depth at which it occurred
#[derive(Debug, Error)]
#[error("parser error at byte {position} (depth {depth}): {kind}")]
pub struct ParseError {
    #[source]
    pub kind: ErrorKind,
    /// Absolute byte offset of the cursor in the input stream
    pub position: u64,
    pub depth: i32,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: u64, depth: i32) -> Self {
        ParseError {
            kind,
            position,
            depth,
        }
    }
}
