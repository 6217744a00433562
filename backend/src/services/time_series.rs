//! Chart series at half-hour, hourly, daily, weekly and monthly granularity.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use crate::models::{
    interval_label, AggregatedSeriesPoint, Granularity, IntervalRecord, INTERVALS_PER_DAY,
};
use crate::services::calendar::display_label;

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Sunday that starts the week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// First day of the month containing `date`.
pub fn month_start_of(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn half_hour_points(records: &[IntervalRecord]) -> Vec<AggregatedSeriesPoint> {
    records
        .iter()
        .flat_map(|record| {
            let day = record.date.format("%Y-%m-%d").to_string();
            (0..INTERVALS_PER_DAY).map(move |i| AggregatedSeriesPoint {
                label: format!("{} {}", day, interval_label(i)),
                value: u64::from(record.intervals.get(i)),
                sort_key: midnight(record.date) + Duration::minutes(30 * i as i64),
            })
        })
        .collect()
}

fn hourly_points(records: &[IntervalRecord]) -> Vec<AggregatedSeriesPoint> {
    records
        .iter()
        .flat_map(|record| {
            let day = record.date.format("%Y-%m-%d").to_string();
            record
                .intervals
                .hourly_totals()
                .into_iter()
                .enumerate()
                .map(move |(h, value)| AggregatedSeriesPoint {
                    label: format!("{} {:02}:00", day, h),
                    value,
                    sort_key: midnight(record.date) + Duration::hours(h as i64),
                })
        })
        .collect()
}

fn daily_points(records: &[IntervalRecord]) -> Vec<AggregatedSeriesPoint> {
    records
        .iter()
        .map(|record| AggregatedSeriesPoint {
            label: display_label(record.date),
            value: record.total(),
            sort_key: midnight(record.date),
        })
        .collect()
}

/// Sum daily totals into buckets keyed by `bucket_of(date)`.
fn bucketed_points(
    records: &[IntervalRecord],
    bucket_of: impl Fn(NaiveDate) -> NaiveDate,
    label_of: impl Fn(NaiveDate) -> String,
) -> Vec<AggregatedSeriesPoint> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(bucket_of(record.date)).or_insert(0) += record.total();
    }

    buckets
        .into_iter()
        .map(|(start, value)| AggregatedSeriesPoint {
            label: label_of(start),
            value,
            sort_key: midnight(start),
        })
        .collect()
}

/// Build the chart series for `records` at `granularity`.
///
/// The result is sorted ascending by `sort_key`; the sort is stable, so
/// equal keys keep their input order.
pub fn build_time_series(
    records: &[IntervalRecord],
    granularity: Granularity,
) -> Vec<AggregatedSeriesPoint> {
    let mut points = match granularity {
        Granularity::HalfHour => half_hour_points(records),
        Granularity::Hourly => hourly_points(records),
        Granularity::Daily => daily_points(records),
        Granularity::Weekly => bucketed_points(records, week_start_of, |start| {
            format!("Week of {}", start.format("%b %-d, %Y"))
        }),
        Granularity::Monthly => bucketed_points(records, month_start_of, |start| {
            start.format("%B %Y").to_string()
        }),
    };
    points.sort_by_key(|p| p.sort_key);

    debug!(
        "Built {:?} series with {} points from {} records",
        granularity,
        points.len(),
        records.len()
    );
    points
}

/// Mean of the series values; 0 for an empty series.
pub fn overall_average(series: &[AggregatedSeriesPoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let sum: u64 = series.iter().map(|p| p.value).sum();
    sum as f64 / series.len() as f64
}

#[cfg(test)]
#[path = "time_series_tests.rs"]
mod time_series_tests;
