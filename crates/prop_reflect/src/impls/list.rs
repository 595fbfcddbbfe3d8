use std::collections::VecDeque;

use crate::info::{GenericTypeInfoCell, ListInfo, TypeInfo, Typed};
use crate::ops::{List, ReflectMut, ReflectRef};
use crate::{FromValue, Reflect, Value};

macro_rules! impl_reflect_list {
    ($($list:ident => $items:ty),*) => {$(
        impl<T: Typed> Typed for $list<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
            }
        }

        /// A list converts element-wise, anything else is empty.
        impl<T: FromValue> FromValue for $list<T> {
            fn from_value(value: Value) -> Self {
                match value {
                    Value::List(items) => items.into_iter().map(T::from_value).collect(),
                    _ => $list::new(),
                }
            }
        }

        impl<T: Reflect + Typed + FromValue> Reflect for $list<T> {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::List(self)
            }

            fn reflect_value(&self) -> Value {
                Value::List(self.iter().map(Reflect::reflect_value).collect())
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

        impl<T: Reflect + Typed + FromValue> List for $list<T> {
            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                <$items>::get(self, index).map(|item| item as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                <$items>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
            }

            #[inline]
            fn len(&self) -> usize {
                <$items>::len(self)
            }
        }
    )*};
}

// Element access goes through the inherent methods, never through `List`.
impl_reflect_list!(Vec => [T], VecDeque => VecDeque<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_access_by_index() {
        let mut hobbies = vec![String::from("reading"), String::from("balls")];
        let list: &mut dyn List = &mut hobbies;

        assert_eq!(list.len(), 2);
        assert!(list.get(2).is_none());
        list.get_mut(0).unwrap().assign(Value::from("chess"));
        assert_eq!(hobbies[0], "chess");
    }

    #[test]
    fn assign_from_non_list_clears() {
        let mut queue: VecDeque<i32> = VecDeque::from([1, 2]);
        queue.assign(Value::from(vec!["3", "x"]));
        assert_eq!(queue, VecDeque::from([3, 0]));
        queue.assign(Value::from("3"));
        assert!(queue.is_empty());
    }
}
