use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::{DayOfWeek, MonthOfYear, WeekStart};
use super::volume::{interval_hour, HOURS_PER_DAY};

/// Which dashboard analysis is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Day-of-week averages.
    #[default]
    Dow,
    /// Volume over time at a chosen granularity.
    Intraday,
}

/// Time bucket size for intraday series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    HalfHour,
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Discriminant of [`PeriodFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodFilterKind {
    Daily,
    Monthly,
    Yearly,
}

/// Record pre-filter applied in intraday mode. Only one kind can be active.
///
/// An empty set places no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum PeriodFilter {
    Daily(Vec<DayOfWeek>),
    Monthly(Vec<MonthOfYear>),
    Yearly(Vec<i32>),
}

impl PeriodFilter {
    pub fn kind(&self) -> PeriodFilterKind {
        match self {
            PeriodFilter::Daily(_) => PeriodFilterKind::Daily,
            PeriodFilter::Monthly(_) => PeriodFilterKind::Monthly,
            PeriodFilter::Yearly(_) => PeriodFilterKind::Yearly,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PeriodFilter::Daily(days) => days.is_empty(),
            PeriodFilter::Monthly(months) => months.is_empty(),
            PeriodFilter::Yearly(years) => years.is_empty(),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            PeriodFilter::Daily(days) => days.is_empty() || days.contains(&DayOfWeek::of(date)),
            PeriodFilter::Monthly(months) => {
                months.is_empty() || months.contains(&MonthOfYear::of(date))
            }
            PeriodFilter::Yearly(years) => years.is_empty() || years.contains(&date.year()),
        }
    }
}

/// Half-open hour window `[start_hour, end_hour)` of retained intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl HourWindow {
    /// Create a window with both bounds clamped to `0..=24`.
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        let max = HOURS_PER_DAY as u8;
        Self {
            start_hour: start_hour.min(max),
            end_hour: end_hour.min(max),
        }
    }

    pub fn full_day() -> Self {
        Self::new(0, HOURS_PER_DAY as u8)
    }

    pub fn is_full_day(&self) -> bool {
        self.start_hour == 0 && usize::from(self.end_hour) >= HOURS_PER_DAY
    }

    pub fn contains_hour(&self, hour: usize) -> bool {
        hour >= usize::from(self.start_hour) && hour < usize::from(self.end_hour)
    }

    /// Whether half-hour slot `index` falls inside the window.
    pub fn contains_interval(&self, index: usize) -> bool {
        self.contains_hour(interval_hour(index))
    }
}

impl Default for HourWindow {
    fn default() -> Self {
        Self::full_day()
    }
}

/// Immutable description of one aggregation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub analysis_mode: AnalysisMode,
    /// Used in intraday mode only.
    pub granularity: Granularity,
    pub dow_filter: Option<DayOfWeek>,
    /// Used in intraday mode only.
    pub period_filter: Option<PeriodFilter>,
    /// Used in intraday mode only.
    pub hour_window: HourWindow,
    pub week_start: WeekStart,
}

impl AggregationConfig {
    pub fn dow() -> Self {
        Self::default()
    }

    pub fn intraday(granularity: Granularity) -> Self {
        Self {
            analysis_mode: AnalysisMode::Intraday,
            granularity,
            ..Self::default()
        }
    }

    pub fn with_dow_filter(mut self, day: DayOfWeek) -> Self {
        self.dow_filter = Some(day);
        self
    }

    pub fn with_period_filter(mut self, filter: PeriodFilter) -> Self {
        self.period_filter = Some(filter);
        self
    }

    pub fn with_hour_window(mut self, window: HourWindow) -> Self {
        self.hour_window = window;
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Same request with a different analysis mode.
    pub fn in_mode(&self, analysis_mode: AnalysisMode) -> Self {
        Self {
            analysis_mode,
            ..self.clone()
        }
    }
}
