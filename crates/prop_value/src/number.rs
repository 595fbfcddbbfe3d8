//! Locale-style number parsing and formatting.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Separators used to read and write grouped numbers such as `1,234.50`.
///
/// # Examples
///
/// ```
/// use prop_value::NumberFormat;
/// use rust_decimal::Decimal;
///
/// let fmt = NumberFormat::default();
/// assert_eq!(fmt.parse("1,234.5"), Some(Decimal::new(12345, 1)));
/// assert_eq!(fmt.format(Decimal::new(12345, 1), 2), "1,234.50");
///
/// let de = NumberFormat::new('.', ',');
/// assert_eq!(de.parse("1.234,5"), Some(Decimal::new(12345, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    pub grouping: char,
    pub decimal: char,
}

impl Default for NumberFormat {
    #[inline]
    fn default() -> Self {
        Self::STANDARD
    }
}

impl NumberFormat {
    /// `,` groups thousands, `.` separates the fraction.
    pub const STANDARD: Self = Self::new(',', '.');

    #[inline]
    pub const fn new(grouping: char, decimal: char) -> Self {
        Self { grouping, decimal }
    }

    /// Parses grouped text. The whole input must be consumed.
    ///
    /// A grouping separator must sit between two digits of the integer
    /// part.
    pub fn parse(&self, text: &str) -> Option<Decimal> {
        let text = text.trim();
        let mut normalized = String::with_capacity(text.len());
        let mut digits = 0_usize;
        let mut prev: Option<char> = None;
        let mut fraction = false;

        for (offset, ch) in text.char_indices() {
            match ch {
                '+' | '-' if offset == 0 => normalized.push(ch),
                '0'..='9' => {
                    normalized.push(ch);
                    digits += 1;
                }
                c if c == self.grouping && !fraction && prev.is_some_and(|p| p.is_ascii_digit()) => {}
                c if c == self.decimal && !fraction && prev != Some(self.grouping) => {
                    fraction = true;
                    normalized.push('.');
                }
                _ => return None,
            }
            prev = Some(ch);
        }

        if digits == 0 || prev == Some(self.grouping) {
            return None;
        }
        Decimal::from_str(&normalized).ok()
    }

    /// Renders `value` rounded half-up to `scale` places, with grouped
    /// integer digits.
    pub fn format(&self, value: Decimal, scale: u32) -> String {
        let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(scale);

        let text = rounded.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        let len = int_part.len();
        for (index, ch) in int_part.chars().enumerate() {
            if index > 0 && (len - index) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(ch);
        }
        if let Some(frac_part) = frac_part {
            out.push(self.decimal);
            out.push_str(frac_part);
        }
        out
    }
}

/// Parses a trimmed decimal: plain, scientific, then grouped with
/// [`NumberFormat::STANDARD`]. Blank input yields `None`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .or_else(|| NumberFormat::STANDARD.parse(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_scientific_and_grouped() {
        assert_eq!(parse_decimal("18"), Some(Decimal::from(18)));
        assert_eq!(parse_decimal(" -0.5 "), Some(Decimal::new(-5, 1)));
        assert_eq!(parse_decimal("1.5e3"), Some(Decimal::from(1500)));
        assert_eq!(parse_decimal("12,345,678.9"), Some(Decimal::new(123456789, 1)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("12abc"), None);
        assert_eq!(parse_decimal(",12"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("-"), None);
    }

    #[test]
    fn grouping_separators_sit_between_digits() {
        let fmt = NumberFormat::STANDARD;
        assert_eq!(fmt.parse("1,,2"), None);
        assert_eq!(fmt.parse("1,.5"), None);
        assert_eq!(fmt.parse("-,1"), None);
        assert_eq!(fmt.parse("12,"), None);
        assert_eq!(fmt.parse("1,2,3"), Some(Decimal::from(123)));
        assert_eq!(parse_decimal("1,,234"), None);
    }

    #[test]
    fn format_groups_and_rounds() {
        let fmt = NumberFormat::STANDARD;
        assert_eq!(fmt.format(Decimal::from(1234567), 0), "1,234,567");
        assert_eq!(fmt.format(Decimal::new(-12345, 1), 2), "-1,234.50");
        assert_eq!(fmt.format(Decimal::new(125, 3), 2), "0.13");
        assert_eq!(fmt.format(Decimal::new(999, 0), 1), "999.0");
        assert_eq!(fmt.format(Decimal::new(-1, 3), 2), "0.00");
    }
}
