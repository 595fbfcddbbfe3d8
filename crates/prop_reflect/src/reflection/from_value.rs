use crate::Value;

/// Total construction from the dynamic [`Value`] model.
///
/// Implementations never fail. `Null` and values that cannot be coerced
/// produce the type's zero value: `0`, `false`, `""`, an empty collection,
/// `None`, or for structs a value built field by field from `Null`.
///
/// # Examples
///
/// ```
/// use prop_reflect::{FromValue, Value};
///
/// assert_eq!(i64::from_value(Value::from("1,024")), 1024);
/// assert_eq!(bool::from_value(Value::from("maybe")), false);
/// assert_eq!(Option::<String>::from_value(Value::Null), None);
/// assert_eq!(Vec::<u8>::from_value(Value::from(vec![1, 2])), vec![1, 2]);
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Self;
}
