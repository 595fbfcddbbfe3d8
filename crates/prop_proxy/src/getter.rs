use std::collections::VecDeque;

use prop_value::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use prop_value::coerce;
use prop_value::indexmap::IndexSet;
use prop_value::num_bigint::BigInt;
use prop_value::rust_decimal::Decimal;
use prop_reflect::Value;

/// Typed reads with fallbacks over a keyed source.
///
/// Implementors only provide [`get_with`](Getter::get_with); every typed
/// accessor coerces the looked-up value and falls back to its default
/// when the value is missing or not convertible. `Output` lets a source
/// whose lookups can fail wrap the result, a proxy over a target returns
/// `Result<T, _>` while a plain map returns `T`.
///
/// # Examples
///
/// ```
/// use prop_proxy::{Getter, proxy_map};
/// use prop_reflect::Value;
///
/// let map = proxy_map(Some([
///     ("age".to_owned(), Value::from("18")),
///     ("vip".to_owned(), Value::from("on")),
/// ]));
///
/// assert_eq!(map.get_int("age"), 18);
/// assert_eq!(map.get_long_or("missing", -1), -1);
/// assert!(map.get_bool("vip"));
/// assert_eq!(map.get_string("missing"), "");
/// ```
pub trait Getter<K: ?Sized> {
    type Output<T>;

    /// Looks up `key` and converts the found value, `Null` when absent.
    fn get_with<T>(&self, key: &K, convert: impl FnOnce(&Value) -> T) -> Self::Output<T>;

    #[inline]
    fn get_bool(&self, key: &K) -> Self::Output<bool> {
        self.get_bool_or(key, false)
    }

    fn get_bool_or(&self, key: &K, default: bool) -> Self::Output<bool> {
        self.get_with(key, |v| coerce::to_bool(v, default))
    }

    #[inline]
    fn get_char(&self, key: &K) -> Self::Output<char> {
        self.get_char_or(key, '\0')
    }

    fn get_char_or(&self, key: &K, default: char) -> Self::Output<char> {
        self.get_with(key, |v| coerce::to_char(v, default))
    }

    #[inline]
    fn get_byte(&self, key: &K) -> Self::Output<i8> {
        self.get_byte_or(key, 0)
    }

    fn get_byte_or(&self, key: &K, default: i8) -> Self::Output<i8> {
        self.get_with(key, |v| coerce::to_i8(v, default))
    }

    #[inline]
    fn get_short(&self, key: &K) -> Self::Output<i16> {
        self.get_short_or(key, 0)
    }

    fn get_short_or(&self, key: &K, default: i16) -> Self::Output<i16> {
        self.get_with(key, |v| coerce::to_i16(v, default))
    }

    #[inline]
    fn get_int(&self, key: &K) -> Self::Output<i32> {
        self.get_int_or(key, 0)
    }

    fn get_int_or(&self, key: &K, default: i32) -> Self::Output<i32> {
        self.get_with(key, |v| coerce::to_i32(v, default))
    }

    #[inline]
    fn get_long(&self, key: &K) -> Self::Output<i64> {
        self.get_long_or(key, 0)
    }

    fn get_long_or(&self, key: &K, default: i64) -> Self::Output<i64> {
        self.get_with(key, |v| coerce::to_i64(v, default))
    }

    #[inline]
    fn get_float(&self, key: &K) -> Self::Output<f32> {
        self.get_float_or(key, 0.0)
    }

    fn get_float_or(&self, key: &K, default: f32) -> Self::Output<f32> {
        self.get_with(key, |v| coerce::to_f32(v, default))
    }

    #[inline]
    fn get_double(&self, key: &K) -> Self::Output<f64> {
        self.get_double_or(key, 0.0)
    }

    fn get_double_or(&self, key: &K, default: f64) -> Self::Output<f64> {
        self.get_with(key, |v| coerce::to_f64(v, default))
    }

    #[inline]
    fn get_decimal(&self, key: &K) -> Self::Output<Decimal> {
        self.get_decimal_or(key, Decimal::ZERO)
    }

    fn get_decimal_or(&self, key: &K, default: Decimal) -> Self::Output<Decimal> {
        self.get_with(key, |v| coerce::to_decimal(v, default))
    }

    #[inline]
    fn get_big_int(&self, key: &K) -> Self::Output<BigInt> {
        self.get_big_int_or(key, BigInt::ZERO)
    }

    fn get_big_int_or(&self, key: &K, default: BigInt) -> Self::Output<BigInt> {
        self.get_with(key, |v| coerce::to_big_int(v, default))
    }

    /// Canonical text of the value, empty when absent.
    #[inline]
    fn get_string(&self, key: &K) -> Self::Output<String> {
        self.get_string_or(key, "")
    }

    fn get_string_or(&self, key: &K, default: &str) -> Self::Output<String> {
        self.get_with(key, |v| coerce::to_string(v, default))
    }

    fn get_date_time(&self, key: &K) -> Self::Output<Option<NaiveDateTime>> {
        self.get_with(key, coerce::to_date_time)
    }

    fn get_date_time_or(&self, key: &K, default: NaiveDateTime) -> Self::Output<NaiveDateTime> {
        self.get_with(key, |v| coerce::to_date_time(v).unwrap_or(default))
    }

    fn get_date(&self, key: &K) -> Self::Output<Option<NaiveDate>> {
        self.get_with(key, coerce::to_date)
    }

    fn get_date_or(&self, key: &K, default: NaiveDate) -> Self::Output<NaiveDate> {
        self.get_with(key, |v| coerce::to_date(v).unwrap_or(default))
    }

    fn get_time(&self, key: &K) -> Self::Output<Option<NaiveTime>> {
        self.get_with(key, coerce::to_time)
    }

    fn get_time_or(&self, key: &K, default: NaiveTime) -> Self::Output<NaiveTime> {
        self.get_with(key, |v| coerce::to_time(v).unwrap_or(default))
    }

    /// Elements of a list value, empty for anything else.
    fn get_list(&self, key: &K) -> Self::Output<Vec<Value>> {
        self.get_with(key, coerce::to_list)
    }

    fn get_deque(&self, key: &K) -> Self::Output<VecDeque<Value>> {
        self.get_with(key, coerce::to_deque)
    }

    /// Distinct elements of a list value in first-occurrence order.
    fn get_set(&self, key: &K) -> Self::Output<IndexSet<Value>> {
        self.get_with(key, coerce::to_set)
    }
}
