//! Total conversions from a raw [`Value`] to a requested semantic type.
//!
//! Two layers are provided:
//!
//! - `*_of` functions return `None` on a coercion miss;
//! - `to_*` functions take the caller's default and never fail.
//!
//! [`coerce`] dispatches over the closed [`TargetKind`] set and returns the
//! converted value in its canonical [`Value`] variant.
//!
//! Rules shared by every target:
//!
//! - `Null` is always a miss;
//! - numeric targets accept numbers and text parseable as a decimal,
//!   including grouped text such as `1,234.5`;
//! - integer targets truncate toward zero, then narrow with wrapping;
//! - collection targets accept lists, anything else yields an empty
//!   container.

use std::collections::VecDeque;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexSet;
use num_bigint::{BigInt, Sign};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::date::{DateParser, today};
use crate::number::parse_decimal;
use crate::Value;

// -----------------------------------------------------------------------------
// TargetKind

/// The closed set of coercion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    BigInt,
    Decimal,
    Str,
    DateTime,
    Date,
    Time,
    List,
    Deque,
    Set,
}

impl TargetKind {
    pub const ALL: [TargetKind; 17] = [
        TargetKind::Bool,
        TargetKind::Byte,
        TargetKind::Char,
        TargetKind::Short,
        TargetKind::Int,
        TargetKind::Long,
        TargetKind::Float,
        TargetKind::Double,
        TargetKind::BigInt,
        TargetKind::Decimal,
        TargetKind::Str,
        TargetKind::DateTime,
        TargetKind::Date,
        TargetKind::Time,
        TargetKind::List,
        TargetKind::Deque,
        TargetKind::Set,
    ];
}

/// Converts `value` to `kind`, `None` on a miss.
///
/// Integer kinds produce [`Value::Int`], floating kinds [`Value::Float`],
/// collection kinds [`Value::List`]. The conversion is idempotent:
/// coercing the result again to the same kind returns it unchanged.
///
/// # Examples
///
/// ```
/// use prop_value::{Value, coerce, TargetKind};
///
/// assert_eq!(coerce::coerce(&Value::from("300"), TargetKind::Byte), Some(Value::Int(44)));
/// assert_eq!(coerce::coerce(&Value::from(3.9), TargetKind::Int), Some(Value::Int(3)));
/// assert_eq!(coerce::coerce(&Value::from("x"), TargetKind::Long), None);
/// assert_eq!(coerce::coerce(&Value::Null, TargetKind::Str), None);
/// ```
pub fn coerce(value: &Value, kind: TargetKind) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    let coerced = match kind {
        TargetKind::Bool => Value::Bool(bool_of(value)?),
        TargetKind::Byte => Value::from(integer_of(value)? as i8),
        TargetKind::Char => Value::Char(char_of(value)?),
        TargetKind::Short => Value::from(integer_of(value)? as i16),
        TargetKind::Int => Value::from(integer_of(value)? as i32),
        TargetKind::Long => Value::from(integer_of(value)? as i64),
        TargetKind::Float => Value::Float(f64::from(float_of(value)? as f32)),
        TargetKind::Double => Value::Float(float_of(value)?),
        TargetKind::BigInt => Value::BigInt(big_int_of(value)?),
        TargetKind::Decimal => Value::Decimal(decimal_of(value)?),
        TargetKind::Str => Value::Str(value.to_string()),
        TargetKind::DateTime => Value::DateTime(date_time_of(value)?),
        TargetKind::Date => Value::Date(date_time_of(value)?.date()),
        TargetKind::Time => Value::Time(date_time_of(value)?.time()),
        TargetKind::List | TargetKind::Deque => Value::List(to_list(value)),
        TargetKind::Set => Value::List(to_set(value).into_iter().collect()),
    };
    Some(coerced)
}

// -----------------------------------------------------------------------------
// Raw conversions

/// `true`/`false`/`on`/`off`, trimmed and case-insensitive.
pub fn bool_of(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(v) => Some(*v),
        Value::Str(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("on") {
                Some(true)
            } else if text.eq_ignore_ascii_case("false") || text.eq_ignore_ascii_case("off") {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// The first character of the canonical text form.
pub fn char_of(value: &Value) -> Option<char> {
    match value {
        Value::Null => None,
        Value::Char(v) => Some(*v),
        Value::Str(text) => text.chars().next(),
        other => other.to_string().chars().next(),
    }
}

/// Any numeric value or decimal text.
pub fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Int(v) => Some(Decimal::from(*v)),
        Value::UInt(v) => Some(Decimal::from(*v)),
        Value::Float(v) if v.is_finite() => parse_decimal(&v.to_string()).or_else(|| Decimal::from_f64(*v)),
        Value::Decimal(v) => Some(*v),
        Value::BigInt(v) => parse_decimal(&v.to_string()),
        Value::Str(text) => parse_decimal(text),
        _ => None,
    }
}

/// Integral part as a 128-bit integer, the common source of every integer
/// target.
pub fn integer_of(value: &Value) -> Option<i128> {
    match value {
        Value::Int(v) => Some(i128::from(*v)),
        Value::UInt(v) => Some(i128::from(*v)),
        Value::Float(v) if v.is_finite() => Some(v.trunc() as i128),
        Value::BigInt(v) => Some(wrapping_i128(v)),
        other => decimal_of(other).and_then(|v| v.trunc().to_i128()),
    }
}

pub fn float_of(value: &Value) -> Option<f64> {
    match value {
        Value::Float(v) => Some(*v),
        Value::Int(v) => Some(*v as f64),
        Value::UInt(v) => Some(*v as f64),
        Value::BigInt(v) => v.to_string().parse().ok(),
        other => decimal_of(other).and_then(|v| v.to_f64()),
    }
}

pub fn big_int_of(value: &Value) -> Option<BigInt> {
    match value {
        Value::BigInt(v) => Some(v.clone()),
        Value::Int(v) => Some(BigInt::from(*v)),
        Value::UInt(v) => Some(BigInt::from(*v)),
        Value::Str(text) => text
            .trim()
            .parse::<BigInt>()
            .ok()
            .or_else(|| integer_of(value).map(BigInt::from)),
        other => integer_of(other).map(BigInt::from),
    }
}

/// Date-time values, dates at midnight, times on today's date, and text
/// recognized by [`DateParser::STANDARD`].
pub fn date_time_of(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(v) => Some(*v),
        Value::Date(v) => Some(v.and_time(NaiveTime::MIN)),
        Value::Time(v) => Some(today().and_time(*v)),
        Value::Str(text) => DateParser::STANDARD.parse(text),
        _ => None,
    }
}

/// Low 128 bits in two's complement, mirroring a narrowing conversion.
fn wrapping_i128(value: &BigInt) -> i128 {
    let bytes = value.to_signed_bytes_le();
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0 };
    let mut buf = [fill; 16];
    for (dst, src) in buf.iter_mut().zip(&bytes) {
        *dst = *src;
    }
    i128::from_le_bytes(buf)
}

// -----------------------------------------------------------------------------
// Typed conversions with defaults

#[inline]
pub fn to_bool(value: &Value, default: bool) -> bool {
    bool_of(value).unwrap_or(default)
}

#[inline]
pub fn to_char(value: &Value, default: char) -> char {
    char_of(value).unwrap_or(default)
}

#[inline]
pub fn to_i8(value: &Value, default: i8) -> i8 {
    integer_of(value).map_or(default, |v| v as i8)
}

#[inline]
pub fn to_i16(value: &Value, default: i16) -> i16 {
    integer_of(value).map_or(default, |v| v as i16)
}

#[inline]
pub fn to_i32(value: &Value, default: i32) -> i32 {
    integer_of(value).map_or(default, |v| v as i32)
}

#[inline]
pub fn to_i64(value: &Value, default: i64) -> i64 {
    integer_of(value).map_or(default, |v| v as i64)
}

#[inline]
pub fn to_f32(value: &Value, default: f32) -> f32 {
    float_of(value).map_or(default, |v| v as f32)
}

#[inline]
pub fn to_f64(value: &Value, default: f64) -> f64 {
    float_of(value).unwrap_or(default)
}

#[inline]
pub fn to_decimal(value: &Value, default: Decimal) -> Decimal {
    decimal_of(value).unwrap_or(default)
}

#[inline]
pub fn to_big_int(value: &Value, default: BigInt) -> BigInt {
    big_int_of(value).unwrap_or(default)
}

/// Canonical text form, `default` for `Null`.
pub fn to_string(value: &Value, default: &str) -> String {
    match value {
        Value::Null => default.to_owned(),
        Value::Str(text) => text.clone(),
        other => other.to_string(),
    }
}

#[inline]
pub fn to_date_time(value: &Value) -> Option<NaiveDateTime> {
    date_time_of(value)
}

#[inline]
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(v) => Some(*v),
        other => date_time_of(other).map(|v| v.date()),
    }
}

#[inline]
pub fn to_time(value: &Value) -> Option<NaiveTime> {
    match value {
        Value::Time(v) => Some(*v),
        other => date_time_of(other).map(|v| v.time()),
    }
}

/// Shallow copy of a list, empty for anything else.
pub fn to_list(value: &Value) -> Vec<Value> {
    match value {
        Value::List(items) => items.clone(),
        _ => Vec::new(),
    }
}

pub fn to_deque(value: &Value) -> VecDeque<Value> {
    match value {
        Value::List(items) => items.iter().cloned().collect(),
        _ => VecDeque::new(),
    }
}

/// Distinct elements in first-occurrence order.
pub fn to_set(value: &Value) -> IndexSet<Value> {
    match value {
        Value::List(items) => items.iter().cloned().collect(),
        _ => IndexSet::new(),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            Value::Null,
            Value::Bool(true),
            Value::Char('7'),
            Value::Int(-129),
            Value::UInt(u64::MAX),
            Value::Float(3.75),
            Value::Float(f64::NAN),
            Value::Decimal(Decimal::new(-123456, 2)),
            Value::BigInt("123456789012345678901234567890123".parse().unwrap()),
            Value::from(""),
            Value::from("  OFF "),
            Value::from("1,234.56"),
            Value::from("2024-01-05 08:30:00"),
            Value::from("10:20"),
            Value::from("hello"),
            Value::from(vec![Value::Int(1), Value::Int(1), Value::from("a")]),
            [("k", 1)].into_iter().collect(),
        ]
    }

    #[test]
    fn coerce_is_idempotent() {
        for value in samples() {
            for kind in TargetKind::ALL {
                let once = coerce(&value, kind);
                if let Some(once) = &once {
                    let twice = coerce(once, kind);
                    assert_eq!(twice.as_ref(), Some(once), "{value:?} as {kind:?}");
                }
            }
        }
    }

    #[test]
    fn null_is_always_default() {
        assert!(to_bool(&Value::Null, true));
        assert_eq!(to_i32(&Value::Null, 9), 9);
        assert_eq!(to_string(&Value::Null, ""), "");
        assert_eq!(to_decimal(&Value::Null, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(to_char(&Value::Null, 'x'), 'x');
        assert_eq!(to_date_time(&Value::Null), None);
        assert!(to_list(&Value::Null).is_empty());
        for kind in TargetKind::ALL {
            assert_eq!(coerce(&Value::Null, kind), None);
        }
    }

    #[test]
    fn booleans() {
        assert!(to_bool(&Value::from(" True "), false));
        assert!(to_bool(&Value::from("on"), false));
        assert!(!to_bool(&Value::from("OFF"), true));
        assert!(to_bool(&Value::from("yes"), true));
        assert!(!to_bool(&Value::Int(1), false));
    }

    #[test]
    fn integers_truncate_and_wrap() {
        assert_eq!(to_i32(&Value::from("18"), 0), 18);
        assert_eq!(to_i32(&Value::from(" 18.9 "), 0), 18);
        assert_eq!(to_i32(&Value::from(-18.9), 0), -18);
        assert_eq!(to_i32(&Value::from("1,024"), 0), 1024);
        assert_eq!(to_i8(&Value::Int(300), 0), 44);
        assert_eq!(to_i16(&Value::from("abc"), 7), 7);
        assert_eq!(to_i64(&Value::from(""), -1), -1);
        assert_eq!(to_i64(&Value::Bool(true), -1), -1);
        assert_eq!(to_i64(&Value::UInt(u64::MAX), 0), -1);
        assert_eq!(to_i32(&Value::from(f64::INFINITY), 5), 5);
    }

    #[test]
    fn decimals_and_floats() {
        assert_eq!(to_decimal(&Value::from(18), Decimal::ZERO), Decimal::from(18));
        assert_eq!(to_decimal(&Value::from(0.1), Decimal::ZERO), Decimal::new(1, 1));
        assert_eq!(to_decimal(&Value::from("x"), Decimal::ONE), Decimal::ONE);
        assert_eq!(to_f64(&Value::from("2.5"), 0.0), 2.5);
        assert_eq!(to_f32(&Value::Int(3), 0.0), 3.0);
        assert_eq!(
            to_big_int(&Value::from("123456789012345678901234567890123"), BigInt::ZERO).to_string(),
            "123456789012345678901234567890123"
        );
        assert_eq!(to_big_int(&Value::from("12.7"), BigInt::ZERO), BigInt::from(12));
    }

    #[test]
    fn chars_and_strings() {
        assert_eq!(to_char(&Value::from("张三"), ' '), '张');
        assert_eq!(to_char(&Value::from(""), '-'), '-');
        assert_eq!(to_char(&Value::Int(65), ' '), '6');
        assert_eq!(to_string(&Value::Int(18), ""), "18");
        assert_eq!(to_string(&Value::from(vec!["a", "b"]), ""), "[a, b]");
    }

    #[test]
    fn dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(to_date(&Value::from("2024-01-05 08:30:00")), Some(date));
        assert_eq!(
            to_date_time(&Value::from(date)),
            Some(date.and_time(NaiveTime::MIN))
        );
        assert_eq!(
            to_time(&Value::from("08:30:00")),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(to_date(&Value::Int(20240105)), None);
    }

    #[test]
    fn collections_never_fail() {
        let list = Value::from(vec![Value::Int(1), Value::Int(1), Value::from("a")]);
        assert_eq!(to_list(&list).len(), 3);
        assert_eq!(to_deque(&list).len(), 3);
        assert_eq!(
            to_set(&list).into_iter().collect::<Vec<_>>(),
            vec![Value::Int(1), Value::from("a")]
        );
        assert!(to_list(&Value::from("a,b")).is_empty());
        assert!(to_set(&Value::Int(3)).is_empty());
        assert_eq!(coerce(&Value::Int(3), TargetKind::List), Some(Value::List(Vec::new())));
    }
}
