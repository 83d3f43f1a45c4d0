//! XML Reader Module
//!
//! - InputBuffer: the refillable window the parser engine scans

pub mod buffered;

pub use buffered::{InputBuffer, DEFAULT_BUFFER_SIZE};
