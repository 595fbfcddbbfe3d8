use crate::info::{GenericTypeInfoCell, OptionInfo, TypeInfo, Typed};
use crate::ops::{MaterializeError, Optional, ReflectMut, ReflectRef, construct};
use crate::{FromValue, Reflect, Value};

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Option(OptionInfo::new::<Self, T>()))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => None,
            other => Some(T::from_value(other)),
        }
    }
}

impl<T: Reflect + Typed + FromValue> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Option(self)
    }

    fn reflect_value(&self) -> Value {
        match self {
            Some(value) => value.reflect_value(),
            None => Value::Null,
        }
    }

    #[inline]
    fn assign(&mut self, value: Value) {
        *self = Self::from_value(value);
    }

    /// Accepts both `Option<T>` and a bare `T`.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        let value = match value.take::<Self>() {
            Ok(value) => {
                *self = value;
                return Ok(());
            }
            Err(value) => value,
        };
        *self = Some(value.take::<T>()?);
        Ok(())
    }
}

impl<T: Reflect + Typed + FromValue> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    fn get_or_materialize(&mut self) -> Result<&mut dyn Reflect, MaterializeError> {
        if self.is_none() {
            let value = construct::<T>()?;
            return Ok(self.insert(value));
        }
        match self {
            Some(value) => Ok(value),
            None => unreachable!("checked above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn set_accepts_inner_type() {
        let mut name: Option<String> = None;
        assert!(name.set(Box::new(String::from("a"))).is_ok());
        assert_eq!(name.as_deref(), Some("a"));
        assert!(name.set(Box::new(None::<String>)).is_ok());
        assert!(name.is_none());
        assert!(name.set(Box::new(1_u8)).is_err());
    }

    #[test]
    fn scalars_do_not_materialize() {
        let mut age: Option<i32> = None;
        let err = age.get_or_materialize().unwrap_err();
        assert_eq!(
            err,
            MaterializeError::NotInstantiable {
                type_path: "i32",
                kind: ReflectKind::Opaque,
            }
        );
        assert!(age.is_none());
    }

    #[test]
    fn dynamic_values_materialize_as_maps() {
        let mut extra: Option<Value> = None;
        let inner = extra.get_or_materialize().unwrap();
        assert!(inner.is::<Value>());
        assert_eq!(extra, Some(Value::Map(Default::default())));
    }
}
