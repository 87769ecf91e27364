//! Open/closed evaluation of a place against its weekly schedule
//!
//! Missing or unusable schedule data is treated as "open": a place is never
//! hidden from the results just because the provider knows little about it.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::models::{OpeningHours, OpeningPeriod};

/// Local day-of-week and time-of-day in a given timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    /// 0 = Sunday .. 6 = Saturday
    pub day: u8,
    /// Minutes since local midnight
    pub minutes: u16,
}

impl LocalClock {
    #[must_use]
    pub const fn new(day: u8, hour: u8, minute: u8) -> Self {
        Self {
            day,
            minutes: hour as u16 * 60 + minute as u16,
        }
    }

    /// Wall clock in the IANA zone `timezone_id` at instant `now`.
    ///
    /// Returns `None` when the identifier is not a known zone.
    #[must_use]
    pub fn in_zone(timezone_id: &str, now: DateTime<Utc>) -> Option<Self> {
        let tz: Tz = timezone_id.parse().ok()?;
        let local = now.with_timezone(&tz);
        let day = u8::try_from(local.weekday().num_days_from_sunday()).ok()?;
        let minutes = u16::try_from(local.hour() * 60 + local.minute()).ok()?;
        Some(Self { day, minutes })
    }

    fn yesterday(&self) -> u8 {
        (self.day % 7 + 6) % 7
    }
}

/// Whether a place with `hours` is open at `now` in `timezone_id`.
///
/// Priority: no schedule → open; provider `open_now` flag → as given;
/// no periods → open; otherwise the periods are evaluated on the local clock.
#[must_use]
pub fn is_open(hours: Option<&OpeningHours>, timezone_id: &str, now: DateTime<Utc>) -> bool {
    let Some(hours) = hours else {
        return true;
    };

    if let Some(open_now) = hours.open_now {
        return open_now;
    }

    let periods = match hours.periods.as_deref() {
        Some(periods) if !periods.is_empty() => periods,
        _ => return true,
    };

    let Some(clock) = LocalClock::in_zone(timezone_id, now) else {
        warn!(timezone_id, "Unknown timezone, treating place as open");
        return true;
    };

    let open = is_open_at(periods, clock);
    debug!(day = clock.day, minutes = clock.minutes, open, "Evaluated opening periods");
    open
}

/// Evaluate opening periods against a local clock
#[must_use]
pub fn is_open_at(periods: &[OpeningPeriod], clock: LocalClock) -> bool {
    let yesterday = clock.yesterday();

    periods.iter().any(|period| {
        let open_minutes = period.open.minutes_of_day();
        let close_minutes = period.close.minutes_of_day();

        if period.open.day == clock.day {
            let open_today = if period.crosses_midnight() {
                clock.minutes >= open_minutes || clock.minutes < close_minutes
            } else {
                open_minutes <= clock.minutes && clock.minutes < close_minutes
            };
            if open_today {
                return true;
            }
        }

        // Opened yesterday and still running: either the provider put the
        // close on today, or it kept yesterday's index with a wrapped time.
        period.open.day == yesterday
            && (period.close.day == clock.day
                || (period.close.day == period.open.day && period.crosses_midnight()))
            && clock.minutes < close_minutes
    })
}

/// Display text for an open flag
#[must_use]
pub fn open_status_text(is_open: bool) -> &'static str {
    if is_open { "Open now" } else { "Closed" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayTime;
    use chrono::TimeZone;

    fn period(open: (u8, u8, u8), close: (u8, u8, u8)) -> OpeningPeriod {
        OpeningPeriod {
            open: DayTime::new(open.0, open.1, open.2),
            close: DayTime::new(close.0, close.1, close.2),
        }
    }

    fn with_periods(periods: Vec<OpeningPeriod>) -> OpeningHours {
        OpeningHours {
            open_now: None,
            periods: Some(periods),
        }
    }

    // 2024-06-15 is a Saturday
    fn saturday_utc(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_missing_hours_fail_open() {
        assert!(is_open(None, "UTC", saturday_utc(3, 0)));
        assert!(is_open(None, "UTC", Utc::now()));
    }

    #[test]
    fn test_open_now_flag_wins() {
        // Periods say open all Saturday, but the provider flag says closed.
        let hours = OpeningHours {
            open_now: Some(false),
            periods: Some(vec![period((6, 0, 0), (6, 23, 59))]),
        };
        assert!(!is_open(Some(&hours), "UTC", saturday_utc(12, 0)));

        let hours = OpeningHours {
            open_now: Some(true),
            periods: Some(vec![]),
        };
        assert!(is_open(Some(&hours), "UTC", saturday_utc(12, 0)));
    }

    #[test]
    fn test_empty_or_missing_periods_fail_open() {
        assert!(is_open(Some(&OpeningHours::default()), "UTC", saturday_utc(4, 0)));
        assert!(is_open(Some(&with_periods(vec![])), "UTC", saturday_utc(4, 0)));
    }

    #[test]
    fn test_unknown_timezone_fails_open() {
        let hours = with_periods(vec![period((1, 9, 0), (1, 17, 0))]);
        assert!(is_open(Some(&hours), "Mars/Olympus_Mons", saturday_utc(12, 0)));
    }

    #[test]
    fn test_same_day_period_boundaries() {
        let periods = vec![period((6, 9, 0), (6, 17, 30))];
        assert!(!is_open_at(&periods, LocalClock::new(6, 8, 59)));
        assert!(is_open_at(&periods, LocalClock::new(6, 9, 0)));
        assert!(is_open_at(&periods, LocalClock::new(6, 17, 29)));
        assert!(!is_open_at(&periods, LocalClock::new(6, 17, 30)));
        assert!(!is_open_at(&periods, LocalClock::new(5, 12, 0)));
    }

    #[test]
    fn test_friday_late_night_open_saturday_morning() {
        let periods = vec![period((5, 22, 0), (5, 2, 0))];
        assert!(is_open_at(&periods, LocalClock::new(6, 1, 0)));
        assert!(!is_open_at(&periods, LocalClock::new(6, 2, 0)));
        assert!(is_open_at(&periods, LocalClock::new(5, 23, 15)));
        assert!(!is_open_at(&periods, LocalClock::new(5, 21, 59)));
    }

    #[test]
    fn test_close_on_next_day_index() {
        let periods = vec![period((5, 22, 0), (6, 2, 0))];
        assert!(is_open_at(&periods, LocalClock::new(6, 1, 30)));
        assert!(!is_open_at(&periods, LocalClock::new(6, 3, 0)));
    }

    #[test]
    fn test_saturday_to_sunday_wraps_week() {
        let periods = vec![period((6, 20, 0), (0, 1, 0))];
        assert!(is_open_at(&periods, LocalClock::new(0, 0, 30)));
        assert!(!is_open_at(&periods, LocalClock::new(0, 1, 0)));
    }

    #[test]
    fn test_no_matching_period_is_closed() {
        let hours = with_periods(vec![
            period((1, 9, 0), (1, 17, 0)),
            period((2, 9, 0), (2, 17, 0)),
        ]);
        assert!(!is_open(Some(&hours), "UTC", saturday_utc(12, 0)));
    }

    #[test]
    fn test_evaluates_in_local_timezone() {
        // 03:00 UTC Saturday is 23:00 Friday in New York (EDT).
        let hours = with_periods(vec![period((5, 18, 0), (5, 23, 30))]);
        let now = saturday_utc(3, 0);
        assert!(is_open(Some(&hours), "America/New_York", now));
        assert!(!is_open(Some(&hours), "UTC", now));
    }

    #[test]
    fn test_local_clock_in_zone() {
        let clock = LocalClock::in_zone("Asia/Tokyo", saturday_utc(16, 45)).unwrap();
        // 16:45 UTC + 9h = 01:45 Sunday
        assert_eq!(clock, LocalClock::new(0, 1, 45));
        assert!(LocalClock::in_zone("Not/AZone", saturday_utc(0, 0)).is_none());
    }

    #[test]
    fn test_yesterday_wraps_and_tolerates_large_days() {
        assert_eq!(LocalClock::new(0, 0, 0).yesterday(), 6);
        assert_eq!(LocalClock::new(3, 0, 0).yesterday(), 2);
        assert_eq!(LocalClock::new(255, 0, 0).yesterday(), 2);

        let periods = vec![period((5, 22, 0), (6, 2, 0))];
        assert!(!is_open_at(&periods, LocalClock::new(250, 1, 0)));
    }

    #[test]
    fn test_open_status_text() {
        assert_eq!(open_status_text(true), "Open now");
        assert_eq!(open_status_text(false), "Closed");
    }
}
