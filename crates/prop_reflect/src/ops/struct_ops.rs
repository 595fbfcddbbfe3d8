use crate::{Reflect, Value};
use prop_value::ValueMap;

/// A reflected struct with named fields.
///
/// Fields are addressed by name or by declaration index. Implemented by
/// `#[derive(Reflect)]`; fields marked `#[reflect(ignore)]` are not visible.
///
/// ```
/// use prop_reflect::derive::Reflect;
/// use prop_reflect::ops::Struct;
///
/// #[derive(Reflect, Default)]
/// struct City {
///     name: String,
///     zip: u32,
/// }
///
/// let mut city = City::default();
/// *city.field_mut("zip").unwrap().downcast_mut::<u32>().unwrap() = 200_000;
///
/// assert_eq!(city.zip, 200_000);
/// assert_eq!(city.name_at(0), Some("name"));
/// assert!(city.field("mayor").is_none());
/// ```
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn name_at(&self, index: usize) -> Option<&str>;

    fn field_len(&self) -> usize;
}

/// Projects a struct into a map of its fields, in declaration order.
pub fn struct_value(value: &dyn Struct) -> Value {
    let mut map = ValueMap::with_capacity(value.field_len());
    for index in 0..value.field_len() {
        if let (Some(name), Some(field)) = (value.name_at(index), value.field_at(index)) {
            map.insert(name.to_owned(), field.reflect_value());
        }
    }
    Value::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FromValue;
    use crate::derive::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Address {
        city: String,
        r#type: u8,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Handle(u32);

    #[derive(Reflect, Debug, PartialEq)]
    struct Person {
        name: String,
        age: i32,
        address: Option<Address>,
        #[reflect(ignore)]
        handle: Handle,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Page<T> {
        items: Vec<T>,
        total: u64,
    }

    #[test]
    fn derived_info_lists_active_fields() {
        let info = Person::type_info().as_struct().unwrap();
        let names: Vec<&str> = info.field_names().collect();
        assert_eq!(names, ["name", "age", "address"]);
        assert!(info.constructor().is_none());
        assert_eq!(
            info.field("address").unwrap().type_info().kind(),
            ReflectKind::Option
        );

        let address = Address::type_info().as_struct().unwrap();
        assert_eq!(address.field_at(1).map(|f| f.name()), Some("type"));
        assert!(address.constructor().is_some());
    }

    #[test]
    fn projection_and_rebuild() {
        let mut person = Person {
            name: "张三".into(),
            age: 18,
            address: Some(Address {
                city: "上海".into(),
                r#type: 1,
            }),
            handle: Handle(9),
        };

        let value = struct_value(&person);
        assert_eq!(value.get("age"), Some(&Value::Int(18)));
        assert!(value.get("handle").is_none());
        let city = value.get("address").and_then(|a| a.get("city"));
        assert_eq!(city, Some(&Value::from("上海")));

        let rebuilt = Person::from_value(value.clone());
        assert_eq!(rebuilt.address, person.address);
        assert_eq!(rebuilt.handle, Handle::default());

        let mut patch = value;
        if let Value::Map(map) = &mut patch {
            map.insert("age".into(), Value::from("20"));
        }
        person.assign(patch);
        assert_eq!(person.age, 20);
        assert_eq!(person.handle, Handle(9));
    }

    #[test]
    fn generic_structs_have_distinct_infos() {
        let a = <Page<String> as Typed>::type_info();
        let b = <Page<i32> as Typed>::type_info();
        assert!(!core::ptr::eq(a, b));
        assert!(core::ptr::eq(a, <Page<String> as Typed>::type_info()));

        let page = Page {
            items: vec![1, 2],
            total: 2,
        };
        assert_eq!(page.field_len(), 2);
        assert_eq!(page.field("items").unwrap().reflect_value(), Value::from(vec![1, 2]));
        assert_eq!(Value::from(page).get("total"), Some(&Value::Int(2)));
    }
}
