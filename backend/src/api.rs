//! Public API surface for the Rust backend.
//!
//! This file consolidates the model types and engine entry points.
//! All data types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    interval_hour, interval_label, AggregatedSeriesPoint, AggregationConfig, AggregationOutput,
    AnalysisMode, CalendarDay, DateRangeBound, DayOfWeek, DowPivotCell, DowPivotRow,
    DowPivotTable, DowSummary, Granularity, HourWindow, IntervalCurve, IntervalRecord,
    IntradayPivotRow, IntradayPivotTable, IntradaySeries, MonthOfYear, PeriodFilter,
    PeriodFilterKind, WeekStart, DATE_FORMAT, HOURS_PER_DAY, INTERVALS_PER_DAY,
};

pub use crate::services::{
    aggregate, apply_dow_filter, available_days, build_dow_pivot, build_intraday_pivot,
    build_time_series, compute_dow_summaries, enumerate_dates, export_series_to_csv,
    export_to_csv, filter_records, intraday_series, overall_average, CsvExportOptions, DowView,
    IntradayView, VolumeRequest,
};

pub use crate::db::{
    LocalRepository, MockRepository, RepositoryError, RepositoryResult, VolumeRepository,
};
