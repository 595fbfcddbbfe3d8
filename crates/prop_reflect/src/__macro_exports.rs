//! Items used by code generated from `#[derive(Reflect)]`.

pub mod macro_utils {
    pub use crate::Value;
    pub use crate::ops::struct_value;
    pub use prop_value::ValueMap;

    use crate::info::{TypeInfo, Typed};
    use crate::{FromValue, Reflect};

    /// Calls a registered getter on a type-erased receiver.
    ///
    /// A receiver of another type reads as `Null`.
    #[inline]
    pub fn call_getter<T: Reflect, R: Reflect>(this: &dyn Reflect, getter: fn(&T) -> R) -> Value {
        match this.downcast_ref::<T>() {
            Some(this) => getter(this).reflect_value(),
            None => Value::Null,
        }
    }

    /// Calls a registered setter, coercing `value` to the parameter type.
    #[inline]
    pub fn call_setter<T: Reflect, A: FromValue>(
        this: &mut dyn Reflect,
        value: Value,
        setter: fn(&mut T, A),
    ) {
        if let Some(this) = this.downcast_mut::<T>() {
            setter(this, A::from_value(value));
        }
    }

    /// Constructor registered by `#[reflect(default)]`.
    pub fn boxed_default<T: Reflect + Default>() -> Box<dyn Reflect> {
        Box::new(T::default())
    }

    #[inline(always)]
    pub fn returns<T, R: Typed>(_: fn(&T) -> R) -> fn() -> &'static TypeInfo {
        R::type_info
    }

    #[inline(always)]
    pub fn accepts<T, A: Typed>(_: fn(&mut T, A)) -> fn() -> &'static TypeInfo {
        A::type_info
    }

    /// The entries of a map value, empty for anything else.
    #[inline]
    pub fn into_fields(value: Value) -> ValueMap {
        match value {
            Value::Map(fields) => fields,
            _ => ValueMap::new(),
        }
    }

    #[inline]
    pub fn take_field(fields: &mut ValueMap, name: &str) -> Value {
        fields.swap_remove(name).unwrap_or_default()
    }
}
