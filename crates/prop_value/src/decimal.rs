//! Null-tolerant decimal arithmetic.
//!
//! Operands are anything convertible into a [`Value`]. A `Null` or
//! unparsable operand counts as zero, and an overflowing result becomes
//! zero, so none of these helpers can fail.
//!
//! ```
//! use prop_value::decimal;
//! use prop_value::Value;
//! use rust_decimal::Decimal;
//!
//! assert_eq!(decimal::add("1.5", Value::Null), Decimal::new(15, 1));
//! assert_eq!(decimal::divide(10, 3, 2), Decimal::new(333, 2));
//! assert_eq!(decimal::divide(10, 0, 2), Decimal::ZERO);
//! assert_eq!(decimal::percent(1, 8), Decimal::new(1250, 2));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Value;
use crate::coerce::decimal_of;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
pub const THOUSAND: Decimal = Decimal::ONE_THOUSAND;
pub const TEN_THOUSAND: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

#[inline]
fn operand(value: impl Into<Value>) -> Decimal {
    decimal_of(&value.into()).unwrap_or(Decimal::ZERO)
}

pub fn add(a: impl Into<Value>, b: impl Into<Value>) -> Decimal {
    operand(a).checked_add(operand(b)).unwrap_or(Decimal::ZERO)
}

/// `a - b`.
pub fn subtract(a: impl Into<Value>, b: impl Into<Value>) -> Decimal {
    operand(a).checked_sub(operand(b)).unwrap_or(Decimal::ZERO)
}

pub fn multiply(a: impl Into<Value>, b: impl Into<Value>) -> Decimal {
    operand(a).checked_mul(operand(b)).unwrap_or(Decimal::ZERO)
}

/// `a / b` rounded half-up to exactly `scale` places.
///
/// A divisor that is zero or negative yields zero.
pub fn divide(a: impl Into<Value>, b: impl Into<Value>, scale: u32) -> Decimal {
    let divisor = operand(b);
    if divisor <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match operand(a).checked_div(divisor) {
        Some(quotient) => {
            let mut rounded =
                quotient.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(scale);
            rounded
        }
        None => Decimal::ZERO,
    }
}

/// `a * 100 / b` with two decimal places.
#[inline]
pub fn percent(a: impl Into<Value>, b: impl Into<Value>) -> Decimal {
    divide(multiply(a, HUNDRED), b, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_count_as_zero() {
        assert_eq!(add(Value::Null, Value::Null), Decimal::ZERO);
        assert_eq!(multiply(Value::Null, 5), Decimal::ZERO);
        assert_eq!(subtract(Value::Null, "2"), Decimal::from(-2));
        assert_eq!(add("abc", 2), Decimal::from(2));
    }

    #[test]
    fn subtract_is_left_minus_right() {
        assert_eq!(subtract(10, 3), Decimal::from(7));
        assert_eq!(subtract("1.25", "0.5"), Decimal::new(75, 2));
    }

    #[test]
    fn divide_rounds_half_up() {
        assert_eq!(divide(1, 8, 2), Decimal::new(13, 2));
        assert_eq!(divide(-1, 8, 2), Decimal::new(-13, 2));
        assert_eq!(divide(10, 2, 2).to_string(), "5.00");
        assert_eq!(divide(10, -2, 2), Decimal::ZERO);
        assert_eq!(divide(10, Value::Null, 2), Decimal::ZERO);
    }

    #[test]
    fn percent_and_constants() {
        assert_eq!(percent(25, 200), Decimal::new(1250, 2));
        assert_eq!(percent(1, 3).to_string(), "33.33");
        assert_eq!(TEN_THOUSAND, Decimal::from(10_000));
        assert_eq!(THOUSAND * Decimal::TEN, TEN_THOUSAND);
        assert_eq!(multiply(HUNDRED, "1.5"), Decimal::from(150));
    }
}
