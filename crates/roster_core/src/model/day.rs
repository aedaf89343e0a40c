//! Calendar-day normalization for attendance keys.
//!
//! # Invariants
//! - Output is the first millisecond of the input's calendar day.
//! - Normalization is idempotent for a fixed time zone.
//! - The function is total: unrepresentable input is returned unchanged.

use chrono::{DateTime, Local, Offset, TimeZone, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;

/// Normalizes an epoch-millisecond timestamp to local midnight.
pub fn normalize_day(epoch_ms: i64) -> i64 {
    normalize_day_in(&Local, epoch_ms)
}

/// Normalizes an epoch-millisecond timestamp to midnight in `tz`.
///
/// When local midnight does not exist (DST gap at 00:00), the day start is
/// computed with the offset in effect at the input instant.
pub fn normalize_day_in<Tz: TimeZone>(tz: &Tz, epoch_ms: i64) -> i64 {
    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(epoch_ms) else {
        return epoch_ms;
    };
    let local = instant.with_timezone(tz);
    let Some(midnight) = local.date_naive().and_hms_opt(0, 0, 0) else {
        return epoch_ms;
    };

    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        None => {
            let offset_ms = i64::from(local.offset().fix().local_minus_utc()) * MILLIS_PER_SECOND;
            midnight.and_utc().timestamp_millis() - offset_ms
        }
    }
}

/// Returns whether two timestamps fall on the same local calendar day.
pub fn same_day(left_ms: i64, right_ms: i64) -> bool {
    normalize_day(left_ms) == normalize_day(right_ms)
}

/// Returns the current instant in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Returns today's normalized local day.
pub fn today() -> i64 {
    normalize_day(now_epoch_ms())
}

#[cfg(test)]
mod tests {
    use super::{normalize_day, normalize_day_in, now_epoch_ms, same_day, today};
    use chrono::{FixedOffset, TimeZone, Utc};

    const DAY_MS: i64 = 86_400_000;

    fn utc_ms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .expect("valid utc timestamp")
            .timestamp_millis()
    }

    #[test]
    fn normalizes_to_utc_midnight() {
        let morning = utc_ms(2024, 3, 14, 9, 26, 53) + 589;
        assert_eq!(normalize_day_in(&Utc, morning), utc_ms(2024, 3, 14, 0, 0, 0));
    }

    #[test]
    fn normalization_is_idempotent() {
        let ts = utc_ms(2024, 7, 1, 23, 59, 59) + 999;
        let once = normalize_day_in(&Utc, ts);
        assert_eq!(normalize_day_in(&Utc, once), once);
    }

    #[test]
    fn same_day_timestamps_normalize_equal_and_different_days_do_not() {
        let early = utc_ms(2024, 1, 10, 0, 0, 1);
        let late = utc_ms(2024, 1, 10, 23, 59, 59);
        let next = utc_ms(2024, 1, 11, 0, 0, 0);
        assert_eq!(normalize_day_in(&Utc, early), normalize_day_in(&Utc, late));
        assert_ne!(normalize_day_in(&Utc, late), normalize_day_in(&Utc, next));
        assert_eq!(
            normalize_day_in(&Utc, next) - normalize_day_in(&Utc, early),
            DAY_MS
        );
    }

    #[test]
    fn respects_fixed_offset_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset");
        // 2024-05-01 20:00 UTC is 2024-05-02 01:30 in +05:30.
        let ts = utc_ms(2024, 5, 1, 20, 0, 0);
        let expected = ist
            .with_ymd_and_hms(2024, 5, 2, 0, 0, 0)
            .single()
            .expect("valid local midnight")
            .timestamp_millis();
        assert_eq!(normalize_day_in(&ist, ts), expected);
    }

    #[test]
    fn out_of_range_input_is_returned_unchanged() {
        assert_eq!(normalize_day_in(&Utc, i64::MAX), i64::MAX);
    }

    #[test]
    fn same_day_compares_local_calendar_days() {
        let midnight = normalize_day(now_epoch_ms());
        assert!(same_day(midnight, midnight + 60_000));
        assert!(same_day(midnight + 60_000, midnight));
        assert!(!same_day(midnight, midnight - 1));
        assert!(!same_day(midnight, midnight + 2 * DAY_MS));
    }

    #[test]
    fn today_is_normalized_current_day() {
        let before = now_epoch_ms();
        let day = today();
        let after = now_epoch_ms();

        assert_eq!(normalize_day(day), day);
        assert!(day <= after);
        assert!(day == normalize_day(before) || day == normalize_day(after));
    }
}
