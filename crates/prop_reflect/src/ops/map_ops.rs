use crate::ops::MaterializeError;
use crate::{Reflect, Value};

/// A map keyed by strings, such as `HashMap<String, V>`.
pub trait Map: Reflect {
    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Returns the entry for `key`, constructing the value type when the
    /// key is absent.
    ///
    /// Fails if the value type is not instantiable.
    fn get_or_materialize(&mut self, key: &str) -> Result<&mut dyn Reflect, MaterializeError>;

    /// Inserts `value` coerced to the value type, replacing any entry.
    fn insert_value(&mut self, key: &str, value: Value);

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
