use hifitime::Epoch;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::ephem_errors::EphemError;

/// Calendar dates accepted by Horizons for START_TIME / STOP_TIME:
/// `YYYY-MM-DD`, `YYYY-Mon-DD`, optionally followed by `HH:MM[:SS[.fff]]`
/// separated by a space or a `T`.
static CALENDAR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{1,2}|[A-Za-z]{3})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?)?$",
    )
    .expect("calendar date regex is valid")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn parse_month(month: &str) -> Option<u8> {
    if let Ok(m) = u8::from_str(month) {
        return (1..=12).contains(&m).then_some(m);
    }
    let lower = month.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|name| *name == lower)
        .map(|idx| idx as u8 + 1)
}

/// Parse a Horizons calendar date string into an [`Epoch`] in the UTC time scale.
///
/// Argument
/// --------
/// * `date_str`: a date such as `2023-01-01`, `2006-Jan-01 00:00` or `2024-12-28T01:47:28.5`
///
/// Return
/// ------
/// * the corresponding [`Epoch`], or [`EphemError::InvalidDate`] if the string does not match
///   one of the accepted layouts or names an impossible date
pub fn parse_calendar_date(date_str: &str) -> Result<Epoch, EphemError> {
    let trimmed = date_str.trim();
    let invalid = || EphemError::InvalidDate(trimmed.to_string());

    let caps = CALENDAR_DATE.captures(trimmed).ok_or_else(invalid)?;

    let year = i32::from_str(&caps[1]).map_err(|_| invalid())?;
    let month = parse_month(&caps[2]).ok_or_else(invalid)?;
    let day = u8::from_str(&caps[3]).map_err(|_| invalid())?;

    let field = |idx: usize| -> Result<u8, EphemError> {
        caps.get(idx)
            .map_or(Ok(0), |m| u8::from_str(m.as_str()).map_err(|_| invalid()))
    };
    let hour = field(4)?;
    let minute = field(5)?;
    let second = field(6)?;

    // right-pad the fractional digits to nanoseconds
    let nanos = match caps.get(7) {
        Some(frac) => {
            let digits = format!("{:0<9}", frac.as_str());
            u32::from_str(&digits).map_err(|_| invalid())?
        }
        None => 0,
    };

    Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, nanos)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let epoch = parse_calendar_date("2023-01-01").unwrap();
        assert_eq!(
            epoch,
            Epoch::from_gregorian_utc(2023, 1, 1, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_horizons_month_name() {
        let epoch = parse_calendar_date("2006-Jan-20 12:30").unwrap();
        assert_eq!(
            epoch,
            Epoch::from_gregorian_utc(2006, 1, 20, 12, 30, 0, 0)
        );
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let epoch = parse_calendar_date("2024-12-28T01:47:28.5").unwrap();
        assert_eq!(
            epoch,
            Epoch::from_gregorian_utc(2024, 12, 28, 1, 47, 28, 500_000_000)
        );
    }

    #[test]
    fn test_reject_bad_dates() {
        assert!(parse_calendar_date("yesterday").is_err());
        assert!(parse_calendar_date("2023-13-01").is_err());
        assert!(parse_calendar_date("2023-Foo-01").is_err());
        assert!(parse_calendar_date("2023-02-30").is_err());
    }

    #[test]
    fn test_ordering() {
        let start = parse_calendar_date("2006-01-01").unwrap();
        let stop = parse_calendar_date("2007-01-20").unwrap();
        assert!(start < stop);
    }
}
