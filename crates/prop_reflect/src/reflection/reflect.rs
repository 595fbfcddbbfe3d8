use core::any::{Any, TypeId};
use core::fmt;

use crate::Value;
use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

/// Runtime access to the properties of a value.
///
/// This trait is usually implemented through `#[derive(Reflect)]`; the
/// crate provides implementations for scalars, text, decimals, dates,
/// `Option`, the standard collections and [`Value`] itself.
///
/// A reflected value can be:
///
/// - projected into the dynamic [`Value`] model with [`reflect_value`];
/// - overwritten from a [`Value`] with [`assign`], coercing as needed;
/// - inspected structurally with [`reflect_ref`] and [`reflect_mut`].
///
/// # Examples
///
/// ```
/// use prop_reflect::{Reflect, Value};
///
/// let mut age = 18_i32;
/// let r: &mut dyn Reflect = &mut age;
///
/// r.assign(Value::from(" 20 "));
/// assert_eq!(age, 20);
/// assert_eq!(age.reflect_value(), Value::Int(20));
/// ```
///
/// [`reflect_value`]: Reflect::reflect_value
/// [`assign`]: Reflect::assign
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the underlying type.
    ///
    /// Unlike `Any::type_id` on a `Box<dyn Reflect>`, this never reports the
    /// id of the box itself.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_type_info().kind()
    }

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Snapshot of this value in the dynamic model.
    ///
    /// Structs become maps of their fields in declaration order.
    fn reflect_value(&self) -> Value;

    /// Overwrites `self` from a dynamic value.
    ///
    /// Never fails: a value that cannot be coerced resolves to the type's
    /// zero value, as [`FromValue`](crate::FromValue) does.
    fn assign(&mut self, value: Value);

    /// Moves `value` into `self` if both have the same type.
    ///
    /// The rejected value is handed back on a type mismatch.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, handing it back unchanged on a mismatch.
    ///
    /// ```
    /// use prop_reflect::Reflect;
    ///
    /// let boxed = 7_u8.into_boxed_reflect();
    /// let boxed = boxed.downcast::<u16>().unwrap_err();
    /// assert_eq!(*boxed.downcast::<u8>().unwrap(), 7);
    /// ```
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.reflect_type_info().ty().name(), self.reflect_value())
    }
}
