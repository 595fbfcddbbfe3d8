//! See [`Reflect`].

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection for structs with named fields
///
/// `#[derive(Reflect)]` implements:
///
/// - `Typed`, with a `StructInfo` listing the fields in declaration order;
/// - `Reflect` and `Struct`;
/// - `FromValue`, building the struct field by field from a map value;
/// - `From<Self> for Value`.
///
/// Every field type must itself implement `Reflect`, `Typed` and
/// `FromValue`. Generic type parameters receive these bounds automatically.
///
/// ## Type attributes
///
/// ### Constructor
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Address { /* ... */ }
/// ```
///
/// Registers `Default::default` as the no-argument constructor. Only types
/// with a constructor can be created on demand when a write walks through
/// an absent `Option<Address>`.
///
/// ### Accessor methods
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(methods(get_full_name, set_full_name))]
/// struct Person { /* ... */ }
/// ```
///
/// Registers inherent methods as property accessors. A name starting with
/// `set` is a setter `fn(&mut self, A)`, anything else is a getter
/// `fn(&self) -> R`. `A` and `R` must be owned reflected types.
///
/// ## Field attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Session {
///     user: String,
///     #[reflect(ignore)]
///     socket: Connection,
/// }
/// ```
///
/// An ignored field is invisible to reflection. It must implement `Default`,
/// which `FromValue` uses to fill it.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_ast(&ast) {
        Ok(reflect_struct) => impls::impl_struct(&reflect_struct).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
