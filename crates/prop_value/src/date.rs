//! Date and time recognition for loosely formatted text.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// How the text matched by a [`DatePattern`] becomes a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternShape {
    /// Date and time of day.
    DateTime,
    /// Date only, placed at the start of the day.
    Date,
    /// Year and month only, placed at the first day of the month.
    YearMonth,
    /// Time of day only, placed on today's local date.
    Time,
    /// Date and time with an UTC offset, converted to local time.
    Zoned,
    /// RFC 3339 text, converted to local time. The format string is unused.
    Rfc3339,
}

/// A `chrono` format string plus the shape of the value it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatePattern {
    pub format: &'static str,
    pub shape: PatternShape,
}

impl DatePattern {
    #[inline]
    pub const fn new(format: &'static str, shape: PatternShape) -> Self {
        Self { format, shape }
    }

    /// Parses `text` in full, `None` if it does not match.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        match self.shape {
            PatternShape::DateTime => NaiveDateTime::parse_from_str(text, self.format).ok(),
            PatternShape::Date => NaiveDate::parse_from_str(text, self.format)
                .ok()
                .map(start_of_day),
            PatternShape::YearMonth => {
                let text = format!("{text}-01");
                let format = format!("{}-%d", self.format);
                NaiveDate::parse_from_str(&text, &format).ok().map(start_of_day)
            }
            PatternShape::Time => NaiveTime::parse_from_str(text, self.format)
                .ok()
                .map(|time| today().and_time(time)),
            PatternShape::Zoned => DateTime::parse_from_str(text, self.format)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local()),
            PatternShape::Rfc3339 => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local()),
        }
    }
}

/// Patterns tried by [`DateParser::STANDARD`], in order.
///
/// Full date-times come first, time-only forms last so that compact digit
/// strings such as `20240105` are read as dates.
pub const STANDARD_PATTERNS: &[DatePattern] = &[
    DatePattern::new("%Y-%m-%d %H:%M:%S", PatternShape::DateTime),
    DatePattern::new("%Y/%m/%d %H:%M:%S", PatternShape::DateTime),
    DatePattern::new("%Y-%m-%d %H:%M", PatternShape::DateTime),
    DatePattern::new("%Y/%m/%d %H:%M", PatternShape::DateTime),
    DatePattern::new("%Y-%m-%d", PatternShape::Date),
    DatePattern::new("%Y/%m/%d", PatternShape::Date),
    DatePattern::new("%Y%m%d%H%M%S", PatternShape::DateTime),
    DatePattern::new("%Y%m%d%H%M", PatternShape::DateTime),
    DatePattern::new("%Y%m%d", PatternShape::Date),
    DatePattern::new("%Y-%m-%d %H:%M:%S%.f", PatternShape::DateTime),
    DatePattern::new("%Y/%m/%d %H:%M:%S%.f", PatternShape::DateTime),
    DatePattern::new("%Y%m%d%H%M%S%3f", PatternShape::DateTime),
    DatePattern::new("%Y-%m-%dT%H:%M:%S%.f", PatternShape::DateTime),
    DatePattern::new("%Y-%m-%dT%H:%M:%S%.f%z", PatternShape::Zoned),
    DatePattern::new("", PatternShape::Rfc3339),
    DatePattern::new("%Y-%m", PatternShape::YearMonth),
    DatePattern::new("%Y/%m", PatternShape::YearMonth),
    DatePattern::new("%Y%m", PatternShape::YearMonth),
    DatePattern::new("%H:%M:%S", PatternShape::Time),
    DatePattern::new("%H%M%S", PatternShape::Time),
    DatePattern::new("%H:%M", PatternShape::Time),
];

/// Tries an ordered list of [`DatePattern`]s and returns the first match.
///
/// # Examples
///
/// ```
/// use prop_value::DateParser;
/// use chrono::NaiveDate;
///
/// let parser = DateParser::STANDARD;
/// let expect = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(8, 30, 0).unwrap();
///
/// assert_eq!(parser.parse("2024-01-05 08:30:00"), Some(expect));
/// assert_eq!(parser.parse("2024/01/05 08:30"), Some(expect));
/// assert_eq!(parser.parse("20240105083000"), Some(expect));
/// assert_eq!(parser.parse("not a date"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    patterns: Cow<'static, [DatePattern]>,
}

impl Default for DateParser {
    #[inline]
    fn default() -> Self {
        Self::STANDARD
    }
}

impl DateParser {
    pub const STANDARD: Self = Self {
        patterns: Cow::Borrowed(STANDARD_PATTERNS),
    };

    /// Creates a parser with a custom pattern table.
    pub fn new(patterns: impl Into<Cow<'static, [DatePattern]>>) -> Self {
        Self {
            patterns: patterns.into(),
        }
    }

    #[inline]
    pub fn patterns(&self) -> &[DatePattern] {
        &self.patterns
    }

    /// Returns the first pattern match for the trimmed text.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let found = self.patterns.iter().find_map(|pattern| pattern.parse(text));
        if found.is_none() {
            log::debug!("no date pattern matches `{text}`");
        }
        found
    }
}

#[inline]
fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

#[inline]
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn dates_start_at_midnight() {
        let parser = DateParser::STANDARD;
        let expect = ymd_hms(2024, 3, 9, 0, 0, 0);
        assert_eq!(parser.parse("2024-03-09"), Some(expect));
        assert_eq!(parser.parse("2024/03/09"), Some(expect));
        assert_eq!(parser.parse("20240309"), Some(expect));
    }

    #[test]
    fn fractions_and_iso() {
        let parser = DateParser::STANDARD;
        let base = ymd_hms(2024, 3, 9, 10, 20, 30);
        let millis = base + chrono::Duration::milliseconds(123);

        assert_eq!(parser.parse("2024-03-09 10:20:30.123"), Some(millis));
        assert_eq!(parser.parse("20240309102030123"), Some(millis));
        assert_eq!(parser.parse("2024-03-09T10:20:30"), Some(base));
        assert_eq!(parser.parse("2024-03-09T10:20:30.123"), Some(millis));
        assert_eq!(parser.parse("202403091020"), Some(ymd_hms(2024, 3, 9, 10, 20, 0)));
    }

    #[test]
    fn year_month_and_time_only() {
        let parser = DateParser::STANDARD;
        assert_eq!(parser.parse("2024-03"), Some(ymd_hms(2024, 3, 1, 0, 0, 0)));
        assert_eq!(parser.parse("202403"), Some(ymd_hms(2024, 3, 1, 0, 0, 0)));

        let time = parser.parse("10:20").unwrap();
        assert_eq!(time.time(), NaiveTime::from_hms_opt(10, 20, 0).unwrap());
        let time = parser.parse("102030").unwrap();
        assert_eq!(time.time(), NaiveTime::from_hms_opt(10, 20, 30).unwrap());
    }

    #[test]
    fn custom_patterns() {
        static ONLY_DAY_FIRST: &[DatePattern] = &[DatePattern::new("%d.%m.%Y", PatternShape::Date)];
        let parser = DateParser::new(ONLY_DAY_FIRST);
        assert_eq!(parser.parse("09.03.2024"), Some(ymd_hms(2024, 3, 9, 0, 0, 0)));
        assert_eq!(parser.parse("2024-03-09"), None);
    }
}
