//! Path-based property access over reflected values.
//!
//! A [`PropertyProxy`] wraps one target and reads or writes its properties
//! through textual paths, creating absent intermediate objects on write and
//! reporting changes to registered listeners. A [`MapProxy`] offers the same
//! typed [`Getter`] surface over a plain map.
//!
//! ```
//! use prop_proxy::{Getter, proxy};
//! use prop_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Reflect, Default)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     address: Option<Address>,
//! }
//!
//! let mut person = proxy(Person::default());
//! person.set("age", "18")?.set("address.city", "上海")?;
//!
//! assert_eq!(person.get_int("age")?, 18);
//! assert_eq!(person.get_string("address.city")?, "上海");
//! assert_eq!(person.get_string("address.zip")?, "");
//! # Ok::<(), prop_proxy::PropertyError>(())
//! ```

// -----------------------------------------------------------------------------
// Modules

mod access;
mod error;
mod getter;
mod map;
mod observer;
mod property;

#[cfg(feature = "json")]
pub mod codec;

// -----------------------------------------------------------------------------
// Exports

pub use error::PropertyError;
pub use getter::Getter;
pub use map::{MapProxy, proxy_map};
pub use observer::{ChangeSupport, ListenerError, ListenerId, PropertyChangeEvent};
pub use property::{PropertyProxy, proxy};

#[cfg(feature = "json")]
pub use codec::CodecError;
