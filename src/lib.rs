//! rustysax - Streaming, event-driven XML parsing
//!
//! A non-validating push parser: bytes come in through any `Read`, and each
//! construct is reported to an `XmlHandler` as soon as it is scanned.
//!
//! Layers:
//! - `core` - name classification, window-relative scanners, entities, errors
//! - `reader` - the refilling input buffer
//! - `parser` - the dispatch loop and document state
//! - `sax` - handler trait, event types, and a collecting handler
//! - `consumers` - identity transform, srcML facts, and event statistics
//!
//! ```
//! use rustysax::{EventCollector, EventKind, XmlParser};
//!
//! let mut collector = EventCollector::new();
//! let stats = XmlParser::new(&b"<a><b/>text</a>"[..]).parse(&mut collector).unwrap();
//! assert_eq!(collector.count(EventKind::StartTag), 2);
//! assert_eq!(stats.final_depth, 0);
//! ```

pub mod cli;
pub mod consumers;
pub mod core;
pub mod parser;
pub mod reader;
pub mod sax;

pub use consumers::{IdentityTransform, SrcFacts, XmlStats};
pub use crate::core::error::{ErrorKind, ParseError, Result};
pub use parser::{ParseStats, ParserConfig, XmlParser};
pub use sax::{parse_events, Event, EventCollector, EventFn, EventKind, OwnedEvent, XmlHandler};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
