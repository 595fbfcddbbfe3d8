use core::hash::BuildHasher;
use std::collections::{BTreeMap, HashMap};

use prop_value::indexmap::IndexMap;

use crate::info::{GenericTypeInfoCell, MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MaterializeError, ReflectMut, ReflectRef, construct};
use crate::{FromValue, Reflect, Value};

macro_rules! impl_reflect_map {
    (
        [$($gen:tt)*] $ty:ty,
        typed: [$($typed:tt)*],
        reflect: [$($bound:tt)*],
        sort_keys: $sort_keys:literal
    ) => {
        impl<$($gen)*> Typed for $ty
        where
            $($typed)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, V>()))
            }
        }

        impl<$($gen)*> FromValue for $ty
        where
            $($bound)*
        {
            fn from_value(value: Value) -> Self {
                match value {
                    Value::Map(entries) => entries
                        .into_iter()
                        .map(|(key, value)| (key, V::from_value(value)))
                        .collect(),
                    _ => Self::default(),
                }
            }
        }

        impl<$($gen)*> Reflect for $ty
        where
            $($bound)*
        {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }

            fn reflect_value(&self) -> Value {
                let mut entries: Vec<(&String, &V)> = <$ty>::iter(self).collect();
                if $sort_keys {
                    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                }
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(key, value)| (key.clone(), value.reflect_value()))
                        .collect(),
                )
            }

            #[inline]
            fn assign(&mut self, value: Value) {
                *self = Self::from_value(value);
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }
        }

        impl<$($gen)*> Map for $ty
        where
            $($bound)*
        {
            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                <$ty>::get(self, key).map(|value| value as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                <$ty>::get_mut(self, key).map(|value| value as &mut dyn Reflect)
            }

            fn get_or_materialize(&mut self, key: &str) -> Result<&mut dyn Reflect, MaterializeError> {
                if !<$ty>::contains_key(self, key) {
                    let value = construct::<V>()?;
                    <$ty>::insert(self, key.to_owned(), value);
                }
                match <$ty>::get_mut(self, key) {
                    Some(value) => Ok(value),
                    None => unreachable!("inserted above"),
                }
            }

            #[inline]
            fn insert_value(&mut self, key: &str, value: Value) {
                <$ty>::insert(self, key.to_owned(), V::from_value(value));
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }
        }
    };
}

impl_reflect_map!(
    [V, S] HashMap<String, V, S>,
    typed: [V: Typed, S: 'static],
    reflect: [
        V: Reflect + Typed + FromValue,
        S: BuildHasher + Default + Send + Sync + 'static,
    ],
    sort_keys: true
);

impl_reflect_map!(
    [V, S] hashbrown::HashMap<String, V, S>,
    typed: [V: Typed, S: 'static],
    reflect: [
        V: Reflect + Typed + FromValue,
        S: BuildHasher + Default + Send + Sync + 'static,
    ],
    sort_keys: true
);

impl_reflect_map!(
    [V, S] IndexMap<String, V, S>,
    typed: [V: Typed, S: 'static],
    reflect: [
        V: Reflect + Typed + FromValue,
        S: BuildHasher + Default + Send + Sync + 'static,
    ],
    sort_keys: false
);

impl_reflect_map!(
    [V] BTreeMap<String, V>,
    typed: [V: Typed],
    reflect: [V: Reflect + Typed + FromValue],
    sort_keys: false
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn hash_maps_project_with_sorted_keys() {
        let scores: HashMap<String, i32> =
            [("b".to_owned(), 2), ("a".to_owned(), 1)].into_iter().collect();
        let keys: Vec<String> = match scores.reflect_value() {
            Value::Map(map) => map.keys().cloned().collect(),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn materialize_requires_instantiable_values() {
        let mut labels: BTreeMap<String, String> = BTreeMap::new();
        let err = labels.get_or_materialize("x").unwrap_err();
        assert!(matches!(err, MaterializeError::NotInstantiable { kind: ReflectKind::Opaque, .. }));
        assert!(labels.is_empty());

        labels.insert_value("x", Value::from(5));
        assert_eq!(labels["x"], "5");

        let mut extra: IndexMap<String, Value> = IndexMap::new();
        extra.get_or_materialize("nested").unwrap();
        assert_eq!(extra["nested"], Value::Map(Default::default()));
    }
}
