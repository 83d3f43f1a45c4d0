//! SAX (Simple API for XML) Module
//!
//! Event-based delivery of parse results.
//!
//! ## Architecture
//!
//! ```text
//! InputBuffer ---> XmlParser ---> XmlHandler (caller)
//!                                    |
//!                                    +--> EventCollector ---> OwnedEvent[]
//! ```
//!
//! ## Event Kinds
//!
//! - `StartDocument` / `EndDocument` - exactly once each, around everything else
//! - `StartTag`, `Attribute`, `Namespace`, `EndTag` - element structure
//! - `Characters`, `CharEntityRef`, `CData` - text content
//! - `Comment`, `Declaration`, `ProcessingInstruction`
//!
//! ## Zero-Copy
//!
//! Handlers receive slices of the parser's rolling buffer. They are valid for
//! the duration of one callback; `EventCollector` copies them when events
//! must be kept.

pub mod collector;
pub mod events;
pub mod handler;

pub use collector::{parse_events, EventCollector};
pub use events::{Event, EventFn, EventKind, OwnedEvent};
pub use handler::XmlHandler;
