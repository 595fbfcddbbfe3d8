use crate::Reflect;
use crate::ops::MaterializeError;

/// A value that may be absent, such as `Option<T>` or a `Null` [`Value`](crate::Value).
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the contained value, constructing it first if absent.
    ///
    /// # Errors
    ///
    /// [`MaterializeError::NotInstantiable`] if the contained type has no
    /// registered constructor.
    fn get_or_materialize(&mut self) -> Result<&mut dyn Reflect, MaterializeError>;
}
