//! Static type information.
//!
//! Every reflected type exposes a `&'static` [`TypeInfo`] through
//! [`Typed::type_info`]. Struct information additionally lists the fields,
//! the registered accessor methods and an optional no-argument constructor,
//! which is what property access and materialization are built on.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod container_info;
mod field_info;
mod method_info;
mod struct_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use container_info::{DynamicInfo, ListInfo, MapInfo, OpaqueInfo, OptionInfo, SetInfo};
pub use field_info::NamedField;
pub use method_info::{GetterFn, MethodInfo, MethodKind, SetterFn};
pub use struct_info::StructInfo;
pub use type_info::{Constructor, ReflectKind, Type, TypeInfo};
pub use typed::{DynamicTyped, Typed};
