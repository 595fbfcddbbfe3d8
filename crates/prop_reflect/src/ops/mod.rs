//! Structural views over reflected values.
//!
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) and
//! [`Reflect::reflect_mut`](crate::Reflect::reflect_mut) expose a value as
//! one of the subtraits below, which is what path traversal dispatches on.
//!
//! - [`Struct`]: named fields, e.g. `Person { name, .. }`.
//! - [`List`]: index-addressable sequences, e.g. `Vec<T>`.
//! - [`Set`]: distinct items, e.g. `HashSet<T>`.
//! - [`Map`]: string-keyed maps, e.g. `HashMap<String, V>`.
//! - [`Optional`]: a value that may be absent, e.g. `Option<T>`.

// -----------------------------------------------------------------------------
// Modules

mod construct;
mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod set_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use construct::{MaterializeError, construct};
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::Map;
pub use option_ops::Optional;
pub use set_ops::Set;
pub use struct_ops::{Struct, struct_value};
