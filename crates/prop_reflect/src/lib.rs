//! Runtime reflection for property access.
//!
//! `#[derive(Reflect)]` generates, for a struct with named fields:
//!
//! - a static [`TypeInfo`](info::TypeInfo) listing fields, registered
//!   accessor methods and an optional constructor;
//! - [`Reflect`] and [`ops::Struct`] for dynamic field access;
//! - [`FromValue`] for total construction from a [`Value`].
//!
//! [`path`] parses textual property paths and [`cache`] memoizes per-type
//! accessor tables for them.
//!
//! # Examples
//!
//! ```
//! use prop_reflect::derive::Reflect;
//! use prop_reflect::{FromValue, Reflect, Value};
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Address {
//!     city: String,
//!     zip: Option<u32>,
//! }
//!
//! let address = Address { city: "上海".into(), zip: None };
//! let value = address.reflect_value();
//! assert_eq!(value.get("city"), Some(&Value::from("上海")));
//! assert_eq!(Address::from_value(value), address);
//! ```

// Generated code names this crate by its absolute path.
extern crate self as prop_reflect;

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod reflection;

pub mod cache;
pub mod info;
pub mod ops;
pub mod path;
pub mod utils;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Exports

pub use prop_reflect_derive as derive;
pub use prop_value::Value;
pub use reflection::{FromValue, Reflect};
