//! Forecast horizon checks and bucket selection.

use crate::models::ForecastEntry;
use chrono::{Days, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Why a target date cannot be forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonViolation {
    Past,
    Beyond { last_available: NaiveDate },
}

/// Check `target` lies within `today ..= today + horizon_days`
pub fn check_horizon(
    target: NaiveDate,
    today: NaiveDate,
    horizon_days: i64,
) -> Result<(), HorizonViolation> {
    let last_available = today
        .checked_add_days(Days::new(horizon_days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX);

    if target < today {
        Err(HorizonViolation::Past)
    } else if target > last_available {
        Err(HorizonViolation::Beyond { last_available })
    } else {
        Ok(())
    }
}

/// Entry closest to local midday of `target` in the city's `offset`.
///
/// Distance is the absolute difference in seconds; on a tie the earlier entry
/// in the list wins.
pub fn nearest_entry(
    entries: &[ForecastEntry],
    target: NaiveDate,
    offset: FixedOffset,
) -> Option<&ForecastEntry> {
    let midday = target.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    // A fixed offset has exactly one mapping for every local time
    let noon = offset
        .from_local_datetime(&midday)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| midday.and_utc().timestamp());

    entries
        .iter()
        .min_by_key(|entry| (entry.at.timestamp() - noon).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherSnapshot;
    use chrono::{DateTime, NaiveDate, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(rfc3339: &str, description: &str) -> ForecastEntry {
        let at = DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc);
        ForecastEntry {
            at,
            snapshot: WeatherSnapshot {
                description: description.to_string(),
                temperature_c: 10.0,
                humidity_pct: 50,
                wind_speed_mps: 1.0,
                pressure_hpa: Some(1013.0),
                observed_at: Some(at),
            },
        }
    }

    #[test]
    fn test_horizon_bounds() {
        let today = ymd(2025, 5, 5);
        assert_eq!(check_horizon(today, today, 5), Ok(()));
        assert_eq!(check_horizon(ymd(2025, 5, 10), today, 5), Ok(()));
        assert_eq!(
            check_horizon(ymd(2025, 5, 11), today, 5),
            Err(HorizonViolation::Beyond {
                last_available: ymd(2025, 5, 10)
            })
        );
        assert_eq!(
            check_horizon(ymd(2025, 5, 4), today, 5),
            Err(HorizonViolation::Past)
        );
    }

    #[test]
    fn test_nearest_prefers_midday_of_target() {
        let entries = vec![
            entry("2025-05-06T09:00:00Z", "morning"),
            entry("2025-05-06T12:00:00Z", "noon"),
            entry("2025-05-06T15:00:00Z", "afternoon"),
            entry("2025-05-07T12:00:00Z", "next day"),
        ];

        let picked = nearest_entry(&entries, ymd(2025, 5, 6), utc()).unwrap();
        assert_eq!(picked.snapshot.description, "noon");
    }

    #[test]
    fn test_nearest_tie_picks_earlier_entry() {
        let entries = vec![
            entry("2025-05-06T09:00:00Z", "nine"),
            entry("2025-05-06T15:00:00Z", "fifteen"),
        ];

        let picked = nearest_entry(&entries, ymd(2025, 5, 6), utc()).unwrap();
        assert_eq!(picked.snapshot.description, "nine");
    }

    #[test]
    fn test_nearest_outside_list_range() {
        // Today late in the evening: only tonight's remaining buckets exist.
        let entries = vec![
            entry("2025-05-05T21:00:00Z", "tonight"),
            entry("2025-05-06T00:00:00Z", "midnight"),
        ];

        let picked = nearest_entry(&entries, ymd(2025, 5, 5), utc()).unwrap();
        assert_eq!(picked.snapshot.description, "tonight");
    }

    #[test]
    fn test_nearest_empty() {
        assert!(nearest_entry(&[], ymd(2025, 5, 5), utc()).is_none());
    }

    #[test]
    fn test_nearest_uses_city_midday() {
        // Local noon in Tokyo is 03:00 UTC
        let entries = vec![
            entry("2025-05-06T03:00:00Z", "tokyo noon"),
            entry("2025-05-06T12:00:00Z", "tokyo evening"),
        ];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        let picked = nearest_entry(&entries, ymd(2025, 5, 6), tokyo).unwrap();
        assert_eq!(picked.snapshot.description, "tokyo noon");
    }
}
