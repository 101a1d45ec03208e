//! Type coercion for captured field text.
//!
//! Date and time formats are tried in a fixed order and the first that parses
//! wins. A failed parse yields `None`; only amounts report failure to the
//! caller.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
enum Width {
    Exact(usize),
    AtLeast(usize),
}

impl Width {
    const fn accepts(self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == n,
            Self::AtLeast(n) => len >= n,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Year {
    /// Four or more digits, taken literally.
    Full,
    /// Exactly two digits in the 2000-2099 century.
    TwoDigit,
}

#[derive(Debug, Clone, Copy)]
struct DateFormat {
    separator: char,
    month: Width,
    day: Width,
    year: Year,
}

impl DateFormat {
    const fn new(separator: char, padded: bool, year: Year) -> Self {
        let width = if padded {
            Width::Exact(2)
        } else {
            Width::AtLeast(1)
        };
        Self {
            separator,
            month: width,
            day: width,
            year,
        }
    }

    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let mut parts = text.split(self.separator);
        let month = number(parts.next()?, self.month)?;
        let day = number(parts.next()?, self.day)?;
        let raw_year = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let year = match self.year {
            Year::Full => i32::try_from(number(raw_year, Width::AtLeast(4))?).ok()?,
            Year::TwoDigit => 2000 + i32::try_from(number(raw_year, Width::Exact(2))?).ok()?,
        };
        if !(1..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
        {
            return None;
        }

        // Days past the end of a shorter month resolve to its last day.
        let day = day.min(last_day_of_month(year, month)?);
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Largest year a four-or-more digit year field accepts.
const MAX_YEAR: i32 = 999_999_999;

/// `MM/dd/yyyy`, `MM-dd-yyyy`, `M/d/yyyy`, `M-d-yyyy`, `MM/dd/yy`, `MM-dd-yy`.
const DATE_FORMATS: [DateFormat; 6] = [
    DateFormat::new('/', true, Year::Full),
    DateFormat::new('-', true, Year::Full),
    DateFormat::new('/', false, Year::Full),
    DateFormat::new('-', false, Year::Full),
    DateFormat::new('/', true, Year::TwoDigit),
    DateFormat::new('-', true, Year::TwoDigit),
];

#[derive(Debug, Clone, Copy)]
enum TimeFormat {
    /// `HH:mm`
    TwentyFourHour,
    /// `h:mm a` when spaced, `h:mma` otherwise.
    Meridiem { spaced: bool },
}

impl TimeFormat {
    fn parse(self, text: &str) -> Option<NaiveTime> {
        let (hour, rest) = text.split_once(':')?;
        match self {
            Self::TwentyFourHour => {
                let hour = number(hour, Width::Exact(2))?;
                let minute = number(rest, Width::Exact(2))?;
                // 24:00 is accepted as midnight.
                if hour == 24 && minute == 0 {
                    return NaiveTime::from_hms_opt(0, 0, 0);
                }
                NaiveTime::from_hms_opt(hour, minute, 0)
            }
            Self::Meridiem { spaced } => {
                let hour = number(hour, Width::AtLeast(1))?;
                let minute = rest.get(..2).and_then(|m| number(m, Width::Exact(2)))?;
                let mut marker = rest.get(2..)?;
                if spaced {
                    marker = marker.strip_prefix(' ')?;
                }
                let offset = match marker {
                    "AM" => 0,
                    "PM" => 12,
                    _ => return None,
                };
                if hour > 12 {
                    return None;
                }
                NaiveTime::from_hms_opt(hour % 12 + offset, minute, 0)
            }
        }
    }
}

const TIME_FORMATS: [TimeFormat; 3] = [
    TimeFormat::TwentyFourHour,
    TimeFormat::Meridiem { spaced: true },
    TimeFormat::Meridiem { spaced: false },
];

fn number(digits: &str, width: Width) -> Option<u32> {
    if !width.accepts(digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

/// Parse a calendar date with the first matching format.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|format| format.parse(text))
}

/// Parse a time of day after uppercasing the text.
#[must_use]
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let upper = text.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|format| format.parse(&upper))
}

/// Why captured amount text did not become a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Not a number once thousands separators are removed.
    Malformed,
    /// A well-formed number too large for a 96-bit decimal.
    OutOfRange,
}

/// Parse an amount after removing thousands separators.
///
/// # Errors
/// Returns [`AmountError`] when the remainder is not a representable number;
/// callers decide how to report it.
pub fn parse_amount(text: &str) -> Result<Decimal, AmountError> {
    let plain = text.replace(',', "");
    Decimal::from_str(&plain).map_err(|_| {
        if is_plain_number(&plain) {
            AmountError::OutOfRange
        } else {
            AmountError::Malformed
        }
    })
}

/// Optional sign, digits, optional fraction; at least one digit overall.
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Split captured attachment text on `,` or `;`.
///
/// The text is trimmed as a whole, tokens are kept as written and trailing
/// empty tokens are dropped. Empty text yields a single empty token.
#[must_use]
pub fn split_attachments(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![String::new()];
    }

    let mut tokens: Vec<String> = trimmed.split([',', ';']).map(str::to_string).collect();
    while tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    #[test]
    fn test_padded_date_is_month_first() {
        assert_eq!(parse_date("03/04/2024"), date(2024, 3, 4));
        assert_eq!(parse_date("12-31-2023"), date(2023, 12, 31));
    }

    #[test]
    fn test_unpadded_dates_fall_through_to_short_formats() {
        assert_eq!(parse_date("3/4/2024"), date(2024, 3, 4));
        assert_eq!(parse_date("11-7-2022"), date(2022, 11, 7));
    }

    #[test]
    fn test_two_digit_year_requires_padded_month_and_day() {
        assert_eq!(parse_date("03/04/24"), date(2024, 3, 4));
        assert_eq!(parse_date("03-04-99"), date(2099, 3, 4));
        assert_eq!(parse_date("3/4/24"), None);
    }

    #[test]
    fn test_invalid_dates_are_absent() {
        assert_eq!(parse_date("13/01/2024"), None);
        assert_eq!(parse_date("00/10/2024"), None);
        assert_eq!(parse_date("01/32/2024"), None);
        assert_eq!(parse_date("01/02/202"), None);
        assert_eq!(parse_date("01/02-2024"), None);
    }

    #[test]
    fn test_out_of_range_years_are_absent() {
        assert_eq!(parse_date("12/31/2147483647"), None);
        assert_eq!(parse_date("01/15/999999999"), None);
        assert_eq!(parse_date("12/31/99999999999"), None);
    }

    #[test]
    fn test_day_past_month_end_resolves_to_last_day() {
        assert_eq!(parse_date("02/30/2024"), date(2024, 2, 29));
        assert_eq!(parse_date("04/31/2023"), date(2023, 4, 30));
    }

    #[test]
    fn test_time_formats_in_order() {
        assert_eq!(parse_time("14:30"), time(14, 30));
        assert_eq!(parse_time("2:45 pm"), time(14, 45));
        assert_eq!(parse_time("09:05 AM"), time(9, 5));
        assert_eq!(parse_time("12:00am"), time(0, 0));
        assert_eq!(parse_time("12:15PM"), time(12, 15));
        assert_eq!(parse_time("24:00"), time(0, 0));
    }

    #[test]
    fn test_clock_hour_zero_is_accepted() {
        assert_eq!(parse_time("00:30 AM"), time(0, 30));
        assert_eq!(parse_time("0:30 AM"), time(0, 30));
        assert_eq!(parse_time("0:30 PM"), time(12, 30));
        assert_eq!(parse_time("0:05pm"), time(12, 5));
    }

    #[test]
    fn test_unparseable_times_are_absent() {
        assert_eq!(parse_time("9:30"), None);
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("13:00 PM"), None);
        assert_eq!(parse_time("9:30  AM"), None);
    }

    #[test]
    fn test_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("24,999.99"), Ok(Decimal::new(2_499_999, 2)));
        assert_eq!(parse_amount("1,500"), Ok(Decimal::from(1500)));
        assert_eq!(parse_amount(",,,"), Err(AmountError::Malformed));
        assert_eq!(parse_amount("12.5.0"), Err(AmountError::Malformed));
    }

    #[test]
    fn test_oversized_amount_is_out_of_range() {
        assert_eq!(
            parse_amount("100,000,000,000,000,000,000,000,000,000"),
            Err(AmountError::OutOfRange)
        );
        assert_eq!(
            parse_amount("-900,000,000,000,000,000,000,000,000,000.00"),
            Err(AmountError::OutOfRange)
        );
    }

    #[test]
    fn test_attachments_keep_token_whitespace() {
        assert_eq!(
            split_attachments("a.pdf, b.jpg;c.png"),
            vec!["a.pdf", " b.jpg", "c.png"]
        );
    }

    #[test]
    fn test_attachments_drop_trailing_empty_tokens() {
        assert_eq!(split_attachments("photo.jpg;;"), vec!["photo.jpg"]);
        assert_eq!(split_attachments(";a.pdf"), vec!["", "a.pdf"]);
        assert!(split_attachments(",").is_empty());
        assert_eq!(split_attachments("  "), vec![""]);
    }
}
