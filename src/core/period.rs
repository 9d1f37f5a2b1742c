//! Period window computation.
//!
//! Turns a named period (day, week, month, year) or an explicit date range into a
//! half-open `[start, end)` window of UTC instants. Boundaries are local midnights
//! under a fixed UTC offset; there is no daylight-saving adjustment.

use crate::errors::{Error, Result};
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta,
    Utc,
};
use std::str::FromStr;

/// Label of every custom date range window
pub const CUSTOM_RANGE_LABEL: &str = "Custom Range";

/// Calendar unit of a named period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    /// One local calendar day
    Day,
    /// Sunday through Saturday
    Week,
    /// One calendar month
    Month,
    /// One calendar year
    Year,
}

impl PeriodKind {
    /// Label attached to windows of this kind; translated by the renderer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }
}

impl FromStr for PeriodKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" | "dia" | "día" | "hoy" => Ok(Self::Day),
            "week" | "semana" => Ok(Self::Week),
            "month" | "mes" => Ok(Self::Month),
            "year" | "año" | "ano" => Ok(Self::Year),
            _ => Err(Error::InvalidCommand {
                message: format!("unknown period '{s}'"),
            }),
        }
    }
}

/// A half-open `[start, end)` window of UTC instants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    /// First instant inside the window
    pub start: DateTime<Utc>,
    /// First instant after the window
    pub end: DateTime<Utc>,
    /// Period label (`Today`, `This Week`, ..., `Custom Range`)
    pub label: String,
}

impl PeriodWindow {
    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Converts local midnight of `date` into the matching UTC instant.
///
/// Fails with [`Error::InvalidDate`] at the edges of the representable calendar.
pub fn local_midnight_utc(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::InvalidDate {
            input: date.to_string(),
        })
}

/// Today's calendar date in the given offset.
#[must_use]
pub fn local_today(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// The local calendar date of a UTC instant.
#[must_use]
pub fn local_date_of(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Parses a `YYYY-MM-DD` date with a four-digit year.
///
/// Signed or extended years (`+262142-12-31`) are rejected along with any other shape.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidDate {
        input: input.to_string(),
    };

    let well_shaped = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}

/// Parses an optional reference date, defaulting to today in the given offset.
pub fn parse_reference_date(input: Option<&str>, offset: FixedOffset) -> Result<NaiveDate> {
    input.map_or_else(|| Ok(local_today(offset)), parse_date)
}

/// Computes the window of `kind` that contains `reference` in local time.
///
/// Weeks start on Sunday. Month and year ends are the first local midnight of the
/// following month or year, so month lengths and December rollover are handled by
/// calendar arithmetic rather than by adding a fixed number of days.
///
/// Fails with [`Error::InvalidDate`] when a bound falls outside the calendar `chrono`
/// can represent.
pub fn compute_period_window(
    kind: PeriodKind,
    reference: NaiveDate,
    offset: FixedOffset,
) -> Result<PeriodWindow> {
    let days_since_sunday = u64::from(reference.weekday().num_days_from_sunday());
    let first_day = match kind {
        PeriodKind::Day => Some(reference),
        PeriodKind::Week => reference.checked_sub_days(Days::new(days_since_sunday)),
        PeriodKind::Month => reference.with_day0(0),
        PeriodKind::Year => reference.with_ordinal0(0),
    };
    let next_first_day = first_day.and_then(|first| match kind {
        PeriodKind::Day => first.checked_add_days(Days::new(1)),
        PeriodKind::Week => first.checked_add_days(Days::new(7)),
        PeriodKind::Month => first.checked_add_months(Months::new(1)),
        PeriodKind::Year => first.checked_add_months(Months::new(12)),
    });
    let (Some(first_day), Some(next_first_day)) = (first_day, next_first_day) else {
        return Err(Error::InvalidDate {
            input: reference.to_string(),
        });
    };

    Ok(PeriodWindow {
        start: local_midnight_utc(first_day, offset)?,
        end: local_midnight_utc(next_first_day, offset)?,
        label: kind.label().to_string(),
    })
}

/// Computes the window covering `start_date` through `end_date`, both inclusive in
/// local time. The upper bound is local midnight of the day after `end_date`.
pub fn compute_custom_window(
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset: FixedOffset,
) -> Result<PeriodWindow> {
    let day_after_end = end_date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| Error::InvalidDate {
            input: end_date.to_string(),
        })?;

    Ok(PeriodWindow {
        start: local_midnight_utc(start_date, offset)?,
        end: local_midnight_utc(day_after_end, offset)?,
        label: CUSTOM_RANGE_LABEL.to_string(),
    })
}

/// Rejects ranges whose end date lies before the start date.
pub fn validate_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if end_date < start_date {
        return Err(Error::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn bogota() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_local_midnight_is_shifted_by_offset() -> Result<()> {
        assert_eq!(local_midnight_utc(date(2024, 3, 6), bogota())?, utc(2024, 3, 6, 5));

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(local_midnight_utc(date(2024, 3, 6), tokyo)?, utc(2024, 3, 5, 15));
        Ok(())
    }

    #[test]
    fn test_day_window() -> Result<()> {
        let window = compute_period_window(PeriodKind::Day, date(2024, 3, 6), bogota())?;
        assert_eq!(window.start, utc(2024, 3, 6, 5));
        assert_eq!(window.end, utc(2024, 3, 7, 5));
        assert_eq!(window.label, "Today");
        Ok(())
    }

    #[test]
    fn test_week_from_wednesday_starts_previous_sunday() -> Result<()> {
        // 2024-03-06 is a Wednesday
        let window = compute_period_window(PeriodKind::Week, date(2024, 3, 6), bogota())?;
        assert_eq!(window.start, utc(2024, 3, 3, 5));
        assert_eq!(window.end, utc(2024, 3, 10, 5));
        assert_eq!(window.end - window.start, TimeDelta::days(7));
        assert_eq!(window.label, "This Week");
        Ok(())
    }

    #[test]
    fn test_week_from_sunday_starts_same_day() -> Result<()> {
        let window = compute_period_window(PeriodKind::Week, date(2024, 3, 3), bogota())?;
        assert_eq!(window.start, utc(2024, 3, 3, 5));
        assert_eq!(window.end, utc(2024, 3, 10, 5));
        Ok(())
    }

    #[test]
    fn test_week_from_saturday_spans_month_boundary() -> Result<()> {
        let window = compute_period_window(PeriodKind::Week, date(2024, 6, 1), bogota())?;
        assert_eq!(window.start, utc(2024, 5, 26, 5));
        assert_eq!(window.end, utc(2024, 6, 2, 5));
        Ok(())
    }

    #[test]
    fn test_week_start_is_always_local_sunday() -> Result<()> {
        let mut day = date(2023, 12, 1);
        while day < date(2024, 3, 1) {
            let window = compute_period_window(PeriodKind::Week, day, bogota())?;
            let local_start = window.start.with_timezone(&bogota());
            assert_eq!(local_start.weekday(), Weekday::Sun, "reference {day}");
            assert_eq!(local_start.time(), NaiveTime::MIN);
            assert!(window.contains(local_midnight_utc(day, bogota())?));
            day = day + Days::new(1);
        }
        Ok(())
    }

    #[test]
    fn test_month_window_in_leap_february() -> Result<()> {
        let window = compute_period_window(PeriodKind::Month, date(2024, 2, 15), bogota())?;
        assert_eq!(window.start, utc(2024, 2, 1, 5));
        assert_eq!(window.end, utc(2024, 3, 1, 5));
        assert_eq!(window.end - window.start, TimeDelta::days(29));
        Ok(())
    }

    #[test]
    fn test_month_window_in_common_february() -> Result<()> {
        let window = compute_period_window(PeriodKind::Month, date(2023, 2, 15), bogota())?;
        assert_eq!(window.end, utc(2023, 3, 1, 5));
        assert_eq!(window.end - window.start, TimeDelta::days(28));
        Ok(())
    }

    #[test]
    fn test_month_window_rolls_over_december() -> Result<()> {
        let window = compute_period_window(PeriodKind::Month, date(2024, 12, 20), bogota())?;
        assert_eq!(window.start, utc(2024, 12, 1, 5));
        assert_eq!(window.end, utc(2025, 1, 1, 5));
        assert_eq!(window.label, "This Month");
        Ok(())
    }

    #[test]
    fn test_month_window_from_last_day_of_month() -> Result<()> {
        let window = compute_period_window(PeriodKind::Month, date(2024, 1, 31), bogota())?;
        assert_eq!(window.start, utc(2024, 1, 1, 5));
        assert_eq!(window.end, utc(2024, 2, 1, 5));
        Ok(())
    }

    #[test]
    fn test_year_window() -> Result<()> {
        let window = compute_period_window(PeriodKind::Year, date(2024, 7, 4), bogota())?;
        assert_eq!(window.start, utc(2024, 1, 1, 5));
        assert_eq!(window.end, utc(2025, 1, 1, 5));
        assert_eq!(window.end - window.start, TimeDelta::days(366));
        Ok(())
    }

    #[test]
    fn test_year_window_from_december_31() -> Result<()> {
        let window = compute_period_window(PeriodKind::Year, date(2023, 12, 31), bogota())?;
        assert_eq!(window.start, utc(2023, 1, 1, 5));
        assert_eq!(window.end, utc(2024, 1, 1, 5));
        Ok(())
    }

    #[test]
    fn test_start_is_before_end_for_every_kind() -> Result<()> {
        let kinds = [PeriodKind::Day, PeriodKind::Week, PeriodKind::Month, PeriodKind::Year];
        let offsets = [
            bogota(),
            FixedOffset::east_opt(0).unwrap(),
            FixedOffset::east_opt(14 * 3600).unwrap(),
        ];
        let mut day = date(2023, 1, 1);
        while day <= date(2024, 12, 31) {
            for kind in kinds {
                for offset in offsets {
                    let window = compute_period_window(kind, day, offset)?;
                    assert!(window.start < window.end, "{kind:?} {day} {offset}");
                }
            }
            day = day + Days::new(3);
        }
        Ok(())
    }

    #[test]
    fn test_late_night_local_instant_belongs_to_local_day() -> Result<()> {
        // 23:30 local on March 6 is 04:30 UTC on March 7
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 4, 30, 0).unwrap();
        let window = compute_period_window(PeriodKind::Day, date(2024, 3, 6), bogota())?;
        assert!(window.contains(instant));
        assert_eq!(local_date_of(instant, bogota()), date(2024, 3, 6));
        Ok(())
    }

    #[test]
    fn test_custom_window_end_is_inclusive() -> Result<()> {
        let window = compute_custom_window(date(2024, 3, 1), date(2024, 3, 15), bogota())?;
        assert_eq!(window.start, utc(2024, 3, 1, 5));
        assert_eq!(window.end, utc(2024, 3, 16, 5));
        assert_eq!(window.label, CUSTOM_RANGE_LABEL);

        let single = compute_custom_window(date(2024, 12, 31), date(2024, 12, 31), bogota())?;
        assert_eq!(single.end, utc(2025, 1, 1, 5));
        Ok(())
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
        assert!(matches!(
            validate_range(date(2024, 3, 2), date(2024, 3, 1)),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_windows_at_calendar_edges_are_errors() {
        assert!(matches!(
            compute_custom_window(date(2024, 1, 1), NaiveDate::MAX, bogota()),
            Err(Error::InvalidDate { .. })
        ));
        // Local midnight of the first representable day in UTC+9 is before it in UTC
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert!(matches!(
            compute_custom_window(NaiveDate::MIN, date(2024, 1, 1), tokyo),
            Err(Error::InvalidDate { .. })
        ));
        for kind in [PeriodKind::Day, PeriodKind::Week, PeriodKind::Month, PeriodKind::Year] {
            assert!(compute_period_window(kind, NaiveDate::MAX, bogota()).is_err(), "{kind:?}");
        }
    }

    #[test]
    fn test_parse_period_kind() {
        assert_eq!("semana".parse::<PeriodKind>().ok(), Some(PeriodKind::Week));
        assert_eq!("MONTH".parse::<PeriodKind>().ok(), Some(PeriodKind::Month));
        assert_eq!("hoy".parse::<PeriodKind>().ok(), Some(PeriodKind::Day));
        assert!("fortnight".parse::<PeriodKind>().is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").ok(), Some(date(2024, 2, 29)));
        assert!(matches!(parse_date("2023-02-29"), Err(Error::InvalidDate { .. })));
        assert!(matches!(parse_date("06/03/2024"), Err(Error::InvalidDate { .. })));
        assert_eq!(parse_date(" 0001-01-01 ").ok(), Some(date(1, 1, 1)));
        for input in ["+262142-12-31", "-0001-01-01", "12024-01-01", "2024-3-6", "2024-03-06x"] {
            assert!(matches!(parse_date(input), Err(Error::InvalidDate { .. })), "{input}");
        }
    }

    #[test]
    fn test_parse_reference_date_defaults_to_today() -> Result<()> {
        let parsed = parse_reference_date(None, bogota())?;
        let today = local_today(bogota());
        // Tolerate a midnight tick between the two calls
        assert!(parsed == today || parsed + Days::new(1) == today);
        assert_eq!(parse_reference_date(Some("2024-03-06"), bogota())?, date(2024, 3, 6));
        Ok(())
    }
}
