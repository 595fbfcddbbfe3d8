use crate::info::{DynamicInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::{List, Map, MaterializeError, Optional, ReflectMut, ReflectRef};
use crate::{FromValue, Reflect, Value};
use prop_value::ValueMap;

impl Typed for Value {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new()))
    }
}

impl FromValue for Value {
    #[inline(always)]
    fn from_value(value: Value) -> Self {
        value
    }
}

/// The structural view follows the current variant: `Null` is an absent
/// optional, maps and lists are traversable, everything else is opaque.
impl Reflect for Value {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Value::Null => ReflectRef::Option(self),
            Value::Map(_) => ReflectRef::Map(self),
            Value::List(_) => ReflectRef::List(self),
            _ => ReflectRef::Opaque(self),
        }
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        match self {
            Value::Null => ReflectMut::Option(self),
            Value::Map(_) => ReflectMut::Map(self),
            Value::List(_) => ReflectMut::List(self),
            _ => ReflectMut::Opaque(self),
        }
    }

    #[inline]
    fn reflect_value(&self) -> Value {
        self.clone()
    }

    #[inline]
    fn assign(&mut self, value: Value) {
        *self = value;
    }

    /// Any reflected value is accepted through its projection.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = match value.take::<Value>() {
            Ok(value) => value,
            Err(other) => other.reflect_value(),
        };
        Ok(())
    }
}

/// The map payload, turning `value` into an empty map first if needed.
fn ensure_map(value: &mut Value) -> &mut ValueMap {
    if !matches!(value, Value::Map(_)) {
        *value = Value::Map(ValueMap::new());
    }
    match value {
        Value::Map(map) => map,
        _ => unreachable!("replaced above"),
    }
}

impl Map for Value {
    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        Value::get(self, key).map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
        self.as_map_mut()?
            .get_mut(key)
            .map(|value| value as &mut dyn Reflect)
    }

    fn get_or_materialize(&mut self, key: &str) -> Result<&mut dyn Reflect, MaterializeError> {
        Ok(ensure_map(self)
            .entry(key.to_owned())
            .or_insert_with(|| Value::Map(ValueMap::new())))
    }

    #[inline]
    fn insert_value(&mut self, key: &str, value: Value) {
        ensure_map(self).insert(key.to_owned(), value);
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_map().map_or(0, ValueMap::len)
    }
}

impl List for Value {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.get_index(index).map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_list_mut()?
            .get_mut(index)
            .map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_list().map_or(0, <[Value]>::len)
    }
}

impl Optional for Value {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        (!self.is_null()).then_some(self as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        if self.is_null() { None } else { Some(self) }
    }

    fn get_or_materialize(&mut self) -> Result<&mut dyn Reflect, MaterializeError> {
        if self.is_null() {
            log::trace!("materializing a null value as an empty map");
            *self = Value::Map(ValueMap::new());
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn shape_follows_variant() {
        assert_eq!(Value::Null.reflect_ref().kind(), ReflectKind::Option);
        assert_eq!(Value::from(vec![1]).reflect_ref().kind(), ReflectKind::List);
        assert_eq!(Value::Map(ValueMap::new()).reflect_ref().kind(), ReflectKind::Map);
        assert_eq!(Value::from("x").reflect_ref().kind(), ReflectKind::Opaque);
        assert_eq!(Value::Null.reflect_kind(), ReflectKind::Dynamic);
    }

    #[test]
    fn null_materializes_into_map() {
        let mut value = Value::Null;
        let inner = Optional::get_or_materialize(&mut value).unwrap();
        Map::insert_value(inner.downcast_mut::<Value>().unwrap(), "city", Value::from("上海"));
        assert_eq!(value.get("city"), Some(&Value::from("上海")));
    }

    #[test]
    fn set_projects_foreign_values() {
        let mut value = Value::Null;
        value.set(Box::new(vec![1_u8, 2])).unwrap();
        assert_eq!(value, Value::from(vec![1, 2]));
    }
}
