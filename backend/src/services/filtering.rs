//! Record filters applied before intraday aggregation.

use chrono::NaiveDate;

use crate::models::{AggregationConfig, AnalysisMode, DayOfWeek, HourWindow, IntervalRecord};

/// Whether a day survives the period and weekday filters of `config`.
///
/// Only intraday requests filter days; DOW requests narrow their output
/// on the summaries instead.
pub fn day_passes(config: &AggregationConfig, date: NaiveDate) -> bool {
    if config.analysis_mode != AnalysisMode::Intraday {
        return true;
    }
    let period_ok = config
        .period_filter
        .as_ref()
        .map_or(true, |filter| filter.matches(date));
    let dow_ok = config
        .dow_filter
        .map_or(true, |day| DayOfWeek::of(date) == day);
    period_ok && dow_ok
}

/// Copy of `record` with every slot outside `window` set to 0.
pub fn apply_hour_window(record: &IntervalRecord, window: HourWindow) -> IntervalRecord {
    if window.is_full_day() {
        return record.clone();
    }
    IntervalRecord {
        intervals: record.intervals.masked(|i| window.contains_interval(i)),
        ..record.clone()
    }
}

/// Apply the intraday filters of `config` to `records`.
///
/// Days are dropped by period/weekday membership, then the hour window
/// zeroes slots. Slots are never removed, so every curve keeps 48 values.
pub fn filter_records(records: &[IntervalRecord], config: &AggregationConfig) -> Vec<IntervalRecord> {
    if config.analysis_mode != AnalysisMode::Intraday {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| day_passes(config, record.date))
        .map(|record| apply_hour_window(record, config.hour_window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Granularity, IntervalCurve, MonthOfYear, PeriodFilter, INTERVALS_PER_DAY};

    fn record(y: i32, m: u32, d: u32) -> IntervalRecord {
        IntervalRecord::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Billing",
            IntervalCurve::uniform(10),
        )
    }

    fn sample() -> Vec<IntervalRecord> {
        vec![
            record(2023, 12, 30), // Saturday
            record(2024, 1, 1),   // Monday
            record(2024, 2, 5),   // Monday
            record(2024, 2, 10),  // Saturday
        ]
    }

    #[test]
    fn test_dow_mode_passes_through() {
        let config = AggregationConfig::dow()
            .with_dow_filter(DayOfWeek::Monday)
            .with_hour_window(HourWindow::new(9, 10));
        assert_eq!(filter_records(&sample(), &config), sample());
    }

    #[test]
    fn test_daily_period_filter() {
        let config = AggregationConfig::intraday(Granularity::Daily)
            .with_period_filter(PeriodFilter::Daily(vec![DayOfWeek::Saturday]));
        let out = filter_records(&sample(), &config);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.day_of_week == DayOfWeek::Saturday));
    }

    #[test]
    fn test_monthly_period_filter() {
        let config = AggregationConfig::intraday(Granularity::Daily)
            .with_period_filter(PeriodFilter::Monthly(vec![MonthOfYear::February]));
        assert_eq!(filter_records(&sample(), &config).len(), 2);
    }

    #[test]
    fn test_yearly_period_filter() {
        let config = AggregationConfig::intraday(Granularity::Daily)
            .with_period_filter(PeriodFilter::Yearly(vec![2023]));
        let out = filter_records(&sample(), &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2023, 12, 30).unwrap());
    }

    #[test]
    fn test_dow_filter_in_intraday_mode() {
        let config =
            AggregationConfig::intraday(Granularity::Hourly).with_dow_filter(DayOfWeek::Monday);
        let out = filter_records(&sample(), &config);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_hour_window_zeroes_outside() {
        let config = AggregationConfig::intraday(Granularity::HalfHour)
            .with_hour_window(HourWindow::new(8, 10));
        let out = filter_records(&sample(), &config);
        assert_eq!(out.len(), 4);
        for r in &out {
            assert_eq!(r.intervals.values().len(), INTERVALS_PER_DAY);
            assert_eq!(r.total(), 4 * 10);
            assert_eq!(r.intervals.get(15), 0);
            assert_eq!(r.intervals.get(16), 10);
            assert_eq!(r.intervals.get(19), 10);
            assert_eq!(r.intervals.get(20), 0);
        }
    }

    #[test]
    fn test_empty_hour_window_zeroes_everything() {
        let config = AggregationConfig::intraday(Granularity::Daily)
            .with_hour_window(HourWindow::new(12, 12));
        assert!(filter_records(&sample(), &config)
            .iter()
            .all(|r| r.total() == 0));
    }

    #[test]
    fn test_hour_window_idempotent() {
        let window = HourWindow::new(6, 20);
        let once = apply_hour_window(&record(2024, 1, 1), window);
        let twice = apply_hour_window(&once, window);
        assert_eq!(once, twice);
    }
}
