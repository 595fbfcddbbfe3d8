//! Reflection for foreign types.
//!
//! - scalars, text, decimals and dates are opaque;
//! - `Option<T>` is optional and only materializes instantiable items;
//! - `Vec` and `VecDeque` are lists, std and hashbrown sets and `BTreeSet`
//!   are sets;
//! - string-keyed std, hashbrown, `BTreeMap` and `IndexMap` maps are maps;
//! - [`Value`](crate::Value) follows the shape of its current variant.

// -----------------------------------------------------------------------------
// Modules

mod list;
mod map;
mod opaque;
mod option;
mod set;
mod value;
