use core::fmt;

use num_bigint::BigInt;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT};
use crate::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Serialize

/// Numbers stay numbers where the target format can hold them:
/// integral decimals become `i64`, other decimals `f64`, big integers
/// outside the 64-bit range are written as strings.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Decimal(v) => serialize_decimal(v, serializer),
            Value::BigInt(v) => serialize_big_int(v, serializer),
            Value::Str(v) => serializer.serialize_str(v),
            Value::DateTime(v) => serializer.collect_str(&v.format(DATE_TIME_FORMAT)),
            Value::Date(v) => serializer.collect_str(&v.format(DATE_FORMAT)),
            Value::Time(v) => serializer.collect_str(&v.format(TIME_FORMAT)),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map {
                    state.serialize_entry(key, item)?;
                }
                state.end()
            }
        }
    }
}

fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.scale() == 0
        && let Some(v) = value.to_i64()
    {
        return serializer.serialize_i64(v);
    }
    match value.to_f64() {
        Some(v) => serializer.serialize_f64(v),
        None => serializer.collect_str(value),
    }
}

fn serialize_big_int<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    if let Ok(v) = i64::try_from(value) {
        serializer.serialize_i64(v)
    } else if let Ok(v) = u64::try_from(value) {
        serializer.serialize_u64(v)
    } else {
        serializer.collect_str(value)
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    #[inline]
    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    #[inline]
    fn visit_char<E: de::Error>(self, v: char) -> Result<Value, E> {
        Ok(Value::Char(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_owned()))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = ValueMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, item)) = access.next_entry::<String, Value>()? {
            map.insert(key, item);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::Value;

    #[test]
    fn serialize_keeps_json_shape() {
        let value: Value = [
            ("name", Value::from("张三")),
            ("age", Value::from(18)),
            ("score", Value::from(Decimal::new(955, 1))),
            ("hobbies", Value::from(vec!["reading", "balls"])),
            ("address", Value::Null),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(
            text,
            r#"{"name":"张三","age":18,"score":95.5,"hobbies":["reading","balls"],"address":null}"#
        );
    }

    #[test]
    fn deserialize_any_json() {
        let value: Value = serde_json::from_str(r#"{"a":[1,-2,1.5,true,null,"x"],"b":{}}"#).unwrap();

        let list = value.get("a").and_then(Value::as_list).unwrap();
        assert_eq!(list[0], Value::Int(1));
        assert_eq!(list[1], Value::Int(-2));
        assert_eq!(list[2], Value::Float(1.5));
        assert_eq!(list[3], Value::Bool(true));
        assert!(list[4].is_null());
        assert_eq!(list[5], Value::from("x"));
        assert_eq!(value.get("b").and_then(Value::as_map).map(|m| m.len()), Some(0));
    }
}
