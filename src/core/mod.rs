//! Core XML scanning primitives
//!
//! - Classify: the name-character membership table
//! - Scanner: window-relative scanners for tags, end tags, and PIs
//! - Attributes: attribute, namespace, and XML declaration scanning
//! - Entities: the three recognized character entity references
//! - Span: window-relative offsets handed between scanner and engine
//! - Error: fatal parse errors

pub mod attributes;
pub mod classify;
pub mod entities;
pub mod error;
pub mod scanner;
pub mod span;
