//! Night-shift minute evaluation.
//!
//! Counts how much of a worked interval falls inside the recurring nightly
//! window. The window may wrap past midnight (22:00–05:00), so each calendar
//! day contributes one occurrence `[day + start, day(+1) + end)` and the
//! result is the sum of the interval's overlaps with those occurrences.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::TimeWindow;

/// Returns the whole minutes of `[entry, exit)` inside the night window.
///
/// The cost is proportional to the number of calendar days spanned, not to
/// the length of the shift. An interval with `exit <= entry` and a window
/// with `start == end` both yield zero.
///
/// # Examples
///
/// ```
/// use ponto_engine::calculation::calculate_night_shift_minutes;
/// use ponto_engine::config::TimeWindow;
/// use chrono::NaiveDateTime;
///
/// let entry = NaiveDateTime::parse_from_str("2026-03-02 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let exit = NaiveDateTime::parse_from_str("2026-03-03 02:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 22:00 to 02:00 falls inside the 22:00–05:00 window
/// assert_eq!(calculate_night_shift_minutes(entry, exit, &TimeWindow::legal_night()), 240);
/// ```
pub fn calculate_night_shift_minutes(
    entry: NaiveDateTime,
    exit: NaiveDateTime,
    window: &TimeWindow,
) -> i64 {
    if exit <= entry || window.start == window.end {
        return 0;
    }

    // A wrapping occurrence anchored on the previous day can reach into the
    // entry day, so start one day early.
    let mut day = entry.date() - Duration::days(1);
    let last_day = exit.date();
    let mut minutes = 0;

    while day <= last_day {
        let (start, end) = occurrence(day, window);
        minutes += overlap_minutes(entry, exit, start, end);
        day += Duration::days(1);
    }

    minutes
}

/// The window occurrence that starts on `day`.
fn occurrence(day: NaiveDate, window: &TimeWindow) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.and_time(window.start);
    let end = if window.wraps_midnight() {
        (day + Duration::days(1)).and_time(window.end)
    } else {
        day.and_time(window.end)
    };
    (start, end)
}

/// Whole minutes shared by `[a_start, a_end)` and `[b_start, b_end)`.
fn overlap_minutes(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        (end - start).num_minutes()
    } else {
        0
    }
}
