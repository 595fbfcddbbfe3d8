use crate::info::TypeInfo;

/// Static access to a type's [`TypeInfo`].
///
/// Implemented by `#[derive(Reflect)]`. Manual implementations store the
/// info in a [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell)
/// or, for generic types, a [`GenericTypeInfoCell`](crate::info::GenericTypeInfoCell).
///
/// # Examples
///
/// ```
/// use prop_reflect::derive::Reflect;
/// use prop_reflect::info::{ReflectKind, Typed};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let info = Point::type_info();
/// assert_eq!(info.kind(), ReflectKind::Struct);
/// assert_eq!(info.as_struct().unwrap().field_len(), 2);
/// ```
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to the [`TypeInfo`] of a value's concrete type.
///
/// Blanket implemented for every [`Typed`] type.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
