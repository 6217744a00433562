//! Table views for the DOW and intraday grids.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{
    interval_label, CalendarDay, DowPivotCell, DowPivotRow, DowPivotTable, DowSummary,
    IntervalRecord, IntradayPivotRow, IntradayPivotTable, INTERVALS_PER_DAY,
};

/// Half-hour rows with one `{value, percentage}` cell per summary.
pub fn build_dow_pivot(summaries: &[DowSummary]) -> DowPivotTable {
    let rows = (0..INTERVALS_PER_DAY)
        .map(|i| {
            let cells: Vec<DowPivotCell> = summaries
                .iter()
                .map(|s| DowPivotCell {
                    value: s.average_intervals.get(i).copied().unwrap_or(0),
                    percentage: s.percentages_per_interval.get(i).copied().unwrap_or(0.0),
                })
                .collect();
            let hourly_total = cells.iter().map(|c| c.value).sum();
            DowPivotRow {
                interval_index: i,
                time_label: interval_label(i),
                cells,
                hourly_total,
            }
        })
        .collect();

    let day_totals: Vec<u64> = summaries.iter().map(|s| s.average_total).collect();
    let grand_total = day_totals.iter().sum();

    DowPivotTable {
        days: summaries.iter().map(|s| s.day_of_week).collect(),
        rows,
        day_totals,
        grand_total,
    }
}

/// Half-hour rows with one column per date in `dates`.
///
/// A date without a record reads as 0.
pub fn build_intraday_pivot(records: &[IntervalRecord], dates: &[CalendarDay]) -> IntradayPivotTable {
    let by_date: HashMap<NaiveDate, &IntervalRecord> =
        records.iter().map(|r| (r.date, r)).collect();
    let columns: Vec<Option<&IntervalRecord>> =
        dates.iter().map(|d| by_date.get(&d.date).copied()).collect();

    let rows = (0..INTERVALS_PER_DAY)
        .map(|i| {
            let values: Vec<u64> = columns
                .iter()
                .map(|col| col.map_or(0, |r| u64::from(r.intervals.get(i))))
                .collect();
            IntradayPivotRow {
                interval_index: i,
                time_label: interval_label(i),
                row_total: values.iter().sum(),
                values,
            }
        })
        .collect();

    IntradayPivotTable {
        dates: dates.to_vec(),
        rows,
        date_totals: columns
            .iter()
            .map(|col| col.map_or(0, |r| r.total()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRangeBound, DayOfWeek, IntervalCurve};
    use crate::services::calendar::enumerate_dates;
    use crate::services::dow::compute_dow_summaries;

    fn record(d: u32, value: u32) -> IntervalRecord {
        IntervalRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            "Billing",
            IntervalCurve::uniform(value),
        )
    }

    #[test]
    fn test_dow_pivot_totals() {
        let records = vec![record(9, 100), record(16, 200), record(10, 10)];
        let summaries =
            compute_dow_summaries(&records, &[DayOfWeek::Saturday, DayOfWeek::Sunday]);
        let table = build_dow_pivot(&summaries);

        assert_eq!(table.days, vec![DayOfWeek::Saturday, DayOfWeek::Sunday]);
        assert_eq!(table.rows.len(), 48);
        assert_eq!(table.rows[0].time_label, "00:00");
        assert_eq!(table.rows[0].cells[0].value, 150);
        assert_eq!(table.rows[0].cells[1].value, 10);
        assert_eq!(table.rows[0].hourly_total, 160);
        assert_eq!(table.day_totals, vec![7200, 480]);
        assert_eq!(table.grand_total, 7680);
    }

    #[test]
    fn test_dow_pivot_empty() {
        let table = build_dow_pivot(&[]);
        assert!(table.days.is_empty());
        assert_eq!(table.rows.len(), 48);
        assert!(table.rows.iter().all(|r| r.cells.is_empty() && r.hourly_total == 0));
        assert_eq!(table.grand_total, 0);
    }

    #[test]
    fn test_intraday_pivot_missing_date_is_zero() {
        let dates = enumerate_dates(&DateRangeBound::new("2024-03-09", "2024-03-11"));
        let records = vec![record(9, 2), record(11, 5)];
        let table = build_intraday_pivot(&records, &dates);

        assert_eq!(table.dates.len(), 3);
        assert_eq!(table.rows[0].values, vec![2, 0, 5]);
        assert_eq!(table.rows[0].row_total, 7);
        assert_eq!(table.date_totals, vec![96, 0, 240]);
    }
}
