//! Date range enumeration for the dashboard filters.

use chrono::NaiveDate;
use log::debug;

use crate::models::{CalendarDay, DateRangeBound, DayOfWeek, WeekStart};

/// Label used for a single day in tables, charts and date pickers.
pub fn display_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Every calendar day from `range.start` to `range.end` inclusive.
///
/// An unparseable or reversed range yields an empty list; callers treat
/// that as "no data".
pub fn enumerate_dates(range: &DateRangeBound) -> Vec<CalendarDay> {
    let Some((start, end)) = range.resolve() else {
        debug!(
            "Ignoring invalid date range start={:?} end={:?}",
            range.start, range.end
        );
        return vec![];
    };

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarDay {
            date,
            day_of_week: DayOfWeek::of(date),
            display_label: display_label(date),
        })
        .collect()
}

/// Distinct weekdays spanned by `dates`, in display order.
pub fn available_days(dates: &[CalendarDay], week_start: WeekStart) -> Vec<DayOfWeek> {
    DayOfWeek::ordered(week_start)
        .into_iter()
        .filter(|day| dates.iter().any(|d| d.day_of_week == *day))
        .collect()
}
