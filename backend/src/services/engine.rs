//! Entry point of the volume aggregation engine.
//!
//! The engine is a family of pure functions: the caller passes the records
//! and an [`AggregationConfig`] on every call and gets a fresh output back.
//! Nothing is cached between calls and no input is mutated.

use crate::models::{
    AggregationConfig, AggregationOutput, AnalysisMode, DayOfWeek, IntervalRecord, IntradaySeries,
};
use crate::services::dow::{apply_dow_filter, compute_dow_summaries};
use crate::services::filtering::filter_records;
use crate::services::time_series::{build_time_series, overall_average};

/// Intraday series for `records` after applying the intraday filters.
pub fn intraday_series(records: &[IntervalRecord], config: &AggregationConfig) -> IntradaySeries {
    let config = config.in_mode(AnalysisMode::Intraday);
    let filtered = filter_records(records, &config);
    let points = build_time_series(&filtered, config.granularity);
    let overall_average = overall_average(&points);
    IntradaySeries {
        granularity: config.granularity,
        points,
        overall_average,
    }
}

/// Run the aggregation selected by `config.analysis_mode`.
///
/// `available_days` lists the weekdays spanned by the requested range, in
/// display order; it only matters in DOW mode.
pub fn aggregate(
    records: &[IntervalRecord],
    config: &AggregationConfig,
    available_days: &[DayOfWeek],
) -> AggregationOutput {
    match config.analysis_mode {
        AnalysisMode::Dow => {
            let summaries = compute_dow_summaries(records, available_days);
            AggregationOutput::Dow {
                summaries: apply_dow_filter(summaries, config.dow_filter),
            }
        }
        AnalysisMode::Intraday => AggregationOutput::Intraday {
            series: intraday_series(records, config),
        },
    }
}
