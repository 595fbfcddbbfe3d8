//! Dynamic property values and the total coercion layer.
//!
//! Every raw property read produces a [`Value`]. The [`coerce`] module turns
//! such a value into a requested semantic type without ever failing: a value
//! that cannot be converted resolves to the caller's default.
//!
//! ```
//! use prop_value::{Value, coerce};
//!
//! let raw = Value::from(" 1,234.5 ");
//! assert_eq!(coerce::to_i32(&raw, 0), 1234);
//! assert_eq!(coerce::to_bool(&Value::from("ON"), false), true);
//! assert_eq!(coerce::to_string(&Value::Null, "n/a"), "n/a");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod serde_impls;
mod value;

pub mod coerce;
pub mod date;
pub mod decimal;
pub mod number;

// -----------------------------------------------------------------------------
// Exports

pub use coerce::TargetKind;
pub use date::{DateParser, DatePattern, PatternShape};
pub use number::NumberFormat;
pub use value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Re-export crates

pub use chrono;
pub use indexmap;
pub use num_bigint;
pub use rust_decimal;
