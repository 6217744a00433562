use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::calendar::{CalendarDay, DayOfWeek};
use super::config::Granularity;
use super::volume::INTERVALS_PER_DAY;

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedSeriesPoint {
    pub label: String,
    pub value: u64,
    /// Chronological key the series is ordered by.
    pub sort_key: NaiveDateTime,
}

/// Average half-hour profile of one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowSummary {
    pub day_of_week: DayOfWeek,
    /// 48 rounded averages.
    pub average_intervals: Vec<u64>,
    pub average_total: u64,
    /// 48 shares of `average_total`, in percent.
    pub percentages_per_interval: Vec<f64>,
    pub sample_count: usize,
}

impl DowSummary {
    /// All-zero summary for a weekday with no samples.
    pub fn empty(day_of_week: DayOfWeek) -> Self {
        Self {
            day_of_week,
            average_intervals: vec![0; INTERVALS_PER_DAY],
            average_total: 0,
            percentages_per_interval: vec![0.0; INTERVALS_PER_DAY],
            sample_count: 0,
        }
    }

    pub fn has_samples(&self) -> bool {
        self.sample_count > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowPivotCell {
    pub value: u64,
    pub percentage: f64,
}

/// One half-hour row of the DOW table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowPivotRow {
    pub interval_index: usize,
    pub time_label: String,
    /// One cell per entry of [`DowPivotTable::days`].
    pub cells: Vec<DowPivotCell>,
    pub hourly_total: u64,
}

/// DOW table view: half-hour rows, weekday columns, totals footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowPivotTable {
    pub days: Vec<DayOfWeek>,
    pub rows: Vec<DowPivotRow>,
    pub day_totals: Vec<u64>,
    pub grand_total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayPivotRow {
    pub interval_index: usize,
    pub time_label: String,
    /// One value per entry of [`IntradayPivotTable::dates`].
    pub values: Vec<u64>,
    pub row_total: u64,
}

/// Intraday table view: half-hour rows, one column per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayPivotTable {
    pub dates: Vec<CalendarDay>,
    pub rows: Vec<IntradayPivotRow>,
    pub date_totals: Vec<u64>,
}

/// Chart series plus its flat average reference line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradaySeries {
    pub granularity: Granularity,
    pub points: Vec<AggregatedSeriesPoint>,
    pub overall_average: f64,
}

/// Result of one aggregation call, shaped by the analysis mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AggregationOutput {
    Dow { summaries: Vec<DowSummary> },
    Intraday { series: IntradaySeries },
}

impl AggregationOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            AggregationOutput::Dow { summaries } => summaries.iter().all(|s| !s.has_samples()),
            AggregationOutput::Intraday { series } => series.points.is_empty(),
        }
    }
}
