use core::fmt;
use core::hash::{Hash, Hasher};
use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use num_bigint::BigInt;
use rust_decimal::Decimal;

/// Ordered string-keyed map of values.
///
/// Insertion order is kept for display and serialization, equality ignores it.
pub type ValueMap = IndexMap<String, Value>;

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed property value.
///
/// `Value` is what a property read returns before any coercion happens.
/// Integers that fit into `i64` are always stored as [`Value::Int`],
/// [`Value::UInt`] only holds values above `i64::MAX`.
///
/// Equality is structural with two relaxations:
/// - `Int` and `UInt` compare by numeric value;
/// - floats compare by total order, so `NaN == NaN`.
///
/// This makes `Value` usable as a set element.
///
/// # Examples
///
/// ```
/// use prop_value::Value;
///
/// let hobbies = Value::from(vec!["reading", "balls"]);
/// assert_eq!(hobbies.to_string(), "[reading, balls]");
/// assert_eq!(hobbies.get_index(1), Some(&Value::from("balls")));
///
/// assert_eq!(Value::from(18_u8), Value::Int(18));
/// assert!(Value::from(None::<i32>).is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    BigInt(BigInt),
    Str(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    List(Vec<Value>),
    Map(ValueMap),
}

pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S%.f";

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a map.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Looks up `index` if this value is a list.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Consumes the value and extracts the entry under `key`.
    pub fn take(self, key: &str) -> Option<Value> {
        match self {
            Value::Map(mut map) => map.swap_remove(key),
            _ => None,
        }
    }

    /// Consumes the value and extracts the element at `index`.
    pub fn take_index(self, index: usize) -> Option<Value> {
        match self {
            Value::List(mut items) if index < items.len() => Some(items.swap_remove(index)),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b).is_eq(),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0_u8.hash(state),
            Value::Bool(v) => {
                1_u8.hash(state);
                v.hash(state);
            }
            Value::Char(v) => {
                2_u8.hash(state);
                v.hash(state);
            }
            // `Int` and `UInt` share a tag, they compare numerically.
            Value::Int(v) => {
                3_u8.hash(state);
                i128::from(*v).hash(state);
            }
            Value::UInt(v) => {
                3_u8.hash(state);
                i128::from(*v).hash(state);
            }
            Value::Float(v) => {
                4_u8.hash(state);
                v.to_bits().hash(state);
            }
            Value::Decimal(v) => {
                5_u8.hash(state);
                v.hash(state);
            }
            Value::BigInt(v) => {
                6_u8.hash(state);
                v.hash(state);
            }
            Value::Str(v) => {
                7_u8.hash(state);
                v.hash(state);
            }
            Value::DateTime(v) => {
                8_u8.hash(state);
                v.hash(state);
            }
            Value::Date(v) => {
                9_u8.hash(state);
                v.hash(state);
            }
            Value::Time(v) => {
                10_u8.hash(state);
                v.hash(state);
            }
            Value::List(v) => {
                11_u8.hash(state);
                v.hash(state);
            }
            // Map equality ignores order, so only the length is hashed.
            Value::Map(v) => {
                12_u8.hash(state);
                v.len().hash(state);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Display

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => fmt::Display::fmt(v, f),
            Value::Char(v) => fmt::Display::fmt(v, f),
            Value::Int(v) => fmt::Display::fmt(v, f),
            Value::UInt(v) => fmt::Display::fmt(v, f),
            Value::Float(v) => fmt::Display::fmt(v, f),
            Value::Decimal(v) => fmt::Display::fmt(v, f),
            Value::BigInt(v) => fmt::Display::fmt(v, f),
            Value::Str(v) => f.write_str(v),
            Value::DateTime(v) => fmt::Display::fmt(&v.format(DATE_TIME_FORMAT), f),
            Value::Date(v) => fmt::Display::fmt(&v.format(DATE_FORMAT), f),
            Value::Time(v) => fmt::Display::fmt(&v.format(TIME_FORMAT), f),
            Value::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_lossless {
    ($variant:ident <= $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_lossless!(Int <= i8, i16, i32, i64, u8, u16, u32);
impl_from_lossless!(Float <= f32, f64);
impl_from_lossless!(Bool <= bool);
impl_from_lossless!(Char <= char);
impl_from_lossless!(Decimal <= Decimal);
impl_from_lossless!(BigInt <= BigInt);
impl_from_lossless!(Str <= String, &str, &String, Cow<'_, str>);
impl_from_lossless!(DateTime <= NaiveDateTime);
impl_from_lossless!(Date <= NaiveDate);
impl_from_lossless!(Time <= NaiveTime);
impl_from_lossless!(Map <= ValueMap);

impl From<u64> for Value {
    #[inline]
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::UInt(value), Value::Int)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        i64::try_from(value).map_or_else(|_| Value::BigInt(value.into()), Value::Int)
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        u64::try_from(value).map_or_else(|_| Value::BigInt(value.into()), Value::from)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(value: &[T]) -> Self {
        Value::List(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn integers_normalize_to_int() {
        assert_eq!(Value::from(7_u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(-3_i128), Value::Int(-3));
        assert!(matches!(Value::from(i128::MAX), Value::BigInt(_)));
        assert_eq!(Value::Int(5), Value::UInt(5));
        assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
    }

    #[test]
    fn float_equality_is_total() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn map_equality_ignores_order() {
        let a: Value = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Value = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);

        let set: HashSet<Value> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_matches_text_form() {
        let list = Value::from(vec![Value::from("a"), Value::Int(1), Value::Null]);
        assert_eq!(list.to_string(), "[a, 1, null]");

        let map: Value = [("city", "上海")].into_iter().collect();
        assert_eq!(map.to_string(), "{city=上海}");

        let dt = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(8, 30, 0))
            .unwrap();
        assert_eq!(Value::from(dt).to_string(), "2024-01-05 08:30:00");
    }

    #[test]
    fn take_consumes_containers() {
        let map: Value = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.clone().take("b"), Some(Value::Int(2)));
        assert_eq!(map.take("c"), None);

        let list = Value::from(vec![1, 2, 3]);
        assert_eq!(list.clone().take_index(0), Some(Value::Int(1)));
        assert_eq!(list.take_index(3), None);
        assert_eq!(Value::Int(1).take("a"), None);
    }
}
