//! Textual property paths such as `address.city` or `hobbies[1]`.
//!
//! # Syntax
//!
//! - Segments are separated by `.`.
//! - A segment is a property name, optionally followed by one index in
//!   brackets: `name` or `name[3]`.
//! - Indices are non-negative decimal integers.
//!
//! Names are taken verbatim: no trimming, no escaping.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod parser;
mod segment;

// -----------------------------------------------------------------------------
// Exports

pub use error::{ParseError, ParseErrorKind};
pub use parser::PathSegments;
pub use segment::{PropertyPath, Segment};
