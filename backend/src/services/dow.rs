//! Day-of-week averages.
//!
//! Each weekday's half-hour slots are summed across its sample days and then
//! averaged with integer rounding. Percentages are taken from the rounded
//! averages, so a summary's percentages need not add up to exactly 100.

use std::collections::HashMap;

use log::debug;

use crate::models::{DayOfWeek, DowSummary, IntervalRecord, INTERVALS_PER_DAY};

/// `sum / count` rounded half-up; 0 when `count` is 0.
pub(crate) fn rounded_average(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (2 * sum + count) / (2 * count)
}

/// Share of `part` in `total`, in percent; 0 when `total` is 0.
pub(crate) fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

struct DayAccumulator {
    sums: [u64; INTERVALS_PER_DAY],
    count: u64,
}

impl DayAccumulator {
    fn new() -> Self {
        Self {
            sums: [0; INTERVALS_PER_DAY],
            count: 0,
        }
    }

    fn add(&mut self, record: &IntervalRecord) {
        for (acc, value) in self.sums.iter_mut().zip(record.intervals.iter()) {
            *acc += u64::from(value);
        }
        self.count += 1;
    }

    fn summarize(&self, day_of_week: DayOfWeek) -> DowSummary {
        let average_intervals: Vec<u64> = self
            .sums
            .iter()
            .map(|&sum| rounded_average(sum, self.count))
            .collect();
        // Rounded independently of the slots: on low multi-sample volumes the
        // slot averages can sum above the total, so percentages exceed 100 in sum.
        let average_total = rounded_average(self.sums.iter().sum(), self.count);
        let percentages_per_interval = average_intervals
            .iter()
            .map(|&avg| percentage(avg, average_total))
            .collect();

        DowSummary {
            day_of_week,
            average_intervals,
            average_total,
            percentages_per_interval,
            sample_count: self.count as usize,
        }
    }
}

/// Average profile for every weekday in `available_days`, in that order.
///
/// Records whose weekday is not listed are ignored; a listed weekday with
/// no records gets an all-zero summary.
pub fn compute_dow_summaries(
    records: &[IntervalRecord],
    available_days: &[DayOfWeek],
) -> Vec<DowSummary> {
    let mut by_day: HashMap<DayOfWeek, DayAccumulator> = HashMap::new();
    for record in records {
        by_day
            .entry(record.day_of_week)
            .or_insert_with(DayAccumulator::new)
            .add(record);
    }

    debug!(
        "Computing DOW summaries for {} records across {} weekdays",
        records.len(),
        available_days.len()
    );

    available_days
        .iter()
        .map(|day| match by_day.get(day) {
            Some(acc) => acc.summarize(*day),
            None => DowSummary::empty(*day),
        })
        .collect()
}

/// Keep only the summary for `dow_filter`, or all of them when unset.
pub fn apply_dow_filter(summaries: Vec<DowSummary>, dow_filter: Option<DayOfWeek>) -> Vec<DowSummary> {
    match dow_filter {
        Some(day) => summaries
            .into_iter()
            .filter(|s| s.day_of_week == day)
            .collect(),
        None => summaries,
    }
}

#[cfg(test)]
#[path = "dow_tests.rs"]
mod dow_tests;
