//! Per-type accessor tables, computed once and shared.
//!
//! The first lookup against a type runs a [`TypeDescriptor`] over its
//! [`TypeInfo`](crate::info::TypeInfo) and memoizes the resulting
//! [`TypeAccessors`]. Entries are never evicted.

// -----------------------------------------------------------------------------
// Modules

mod accessor_cache;
mod descriptor;
mod record;

// -----------------------------------------------------------------------------
// Exports

pub use accessor_cache::AccessorCache;
pub use descriptor::{ConventionDescriptor, TypeDescriptor, property_name};
pub use record::{AccessorRecord, FieldHandle, TypeAccessors};
