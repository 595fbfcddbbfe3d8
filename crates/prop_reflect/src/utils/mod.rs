//! Hash containers shared by the reflection layer and its users.

// -----------------------------------------------------------------------------
// Modules

mod hasher;
mod typeid_map;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher, NoOpHashState, NoOpHasher};
pub use typeid_map::TypeIdMap;

/// A [`hashbrown::HashMap`] with a fixed-seed `foldhash` hasher.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] with a fixed-seed `foldhash` hasher.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
