use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeSet, HashSet};

use crate::info::{GenericTypeInfoCell, SetInfo, TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef, Set};
use crate::{FromValue, Reflect, Value};

macro_rules! impl_reflect_set {
    ([$($gen:tt)*] $ty:ty, typed: [$($typed:tt)*], reflect: [$($bound:tt)*]) => {
        impl<$($gen)*> Typed for $ty
        where
            $($typed)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>()))
            }
        }

        impl<$($gen)*> FromValue for $ty
        where
            $($bound)*
        {
            fn from_value(value: Value) -> Self {
                match value {
                    Value::List(items) => items.into_iter().map(T::from_value).collect(),
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
                ReflectRef::Set(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Set(self)
            }

            fn reflect_value(&self) -> Value {
                Value::List(<$ty>::iter(self).map(Reflect::reflect_value).collect())
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

        impl<$($gen)*> Set for $ty
        where
            $($bound)*
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<$ty>::iter(self).map(|item| item as &dyn Reflect))
            }
        }
    };
}

impl_reflect_set!(
    [T, S] HashSet<T, S>,
    typed: [T: Typed, S: 'static],
    reflect: [
        T: Reflect + Typed + FromValue + Eq + Hash,
        S: BuildHasher + Default + Send + Sync + 'static,
    ]
);

impl_reflect_set!(
    [T, S] hashbrown::HashSet<T, S>,
    typed: [T: Typed, S: 'static],
    reflect: [
        T: Reflect + Typed + FromValue + Eq + Hash,
        S: BuildHasher + Default + Send + Sync + 'static,
    ]
);

impl_reflect_set!(
    [T] BTreeSet<T>,
    typed: [T: Typed],
    reflect: [T: Reflect + Typed + FromValue + Ord]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::HashSet as FixedHashSet;

    #[test]
    fn sets_deduplicate_on_assign() {
        let mut tags: BTreeSet<String> = BTreeSet::new();
        tags.assign(Value::from(vec!["b", "a", "b"]));
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.reflect_value(), Value::from(vec!["a", "b"]));

        let mut ids: FixedHashSet<u32> = FixedHashSet::default();
        ids.assign(Value::from(vec![1, 1, 2]));
        let set: &dyn Set = &ids;
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().count(), 2);
    }
}
