//! Dashboard views assembled from repository data.
//!
//! Each function fetches the records of one line of business for the
//! requested range, runs the engine over them and packages the result the
//! way the dashboard renders it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::db::repository::{RepositoryResult, VolumeRepository};
use crate::models::{
    AggregationConfig, AnalysisMode, CalendarDay, DateRangeBound, DayOfWeek, DowPivotTable,
    DowSummary, Granularity, IntervalRecord, IntradayPivotTable, IntradaySeries,
};
use crate::services::calendar::{available_days, enumerate_dates};
use crate::services::dow::{apply_dow_filter, compute_dow_summaries};
use crate::services::engine::intraday_series;
use crate::services::export::{export_series_to_csv, export_to_csv, CsvExportOptions};
use crate::services::filtering::{day_passes, filter_records};
use crate::services::pivot::{build_dow_pivot, build_intraday_pivot};

/// A dashboard query: range, line of business and aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub date_range: DateRangeBound,
    pub line_of_business: String,
    #[serde(default)]
    pub config: AggregationConfig,
}

impl VolumeRequest {
    pub fn new(
        date_range: DateRangeBound,
        line_of_business: impl Into<String>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            date_range,
            line_of_business: line_of_business.into(),
            config,
        }
    }
}

/// Day-of-week tab: average curve per weekday plus its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowView {
    pub line_of_business: String,
    pub date_count: usize,
    pub available_days: Vec<DayOfWeek>,
    pub summaries: Vec<DowSummary>,
    pub pivot: DowPivotTable,
    pub has_data: bool,
}

/// Intraday tab: chart series plus, at half-hour granularity, the per-date table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayView {
    pub line_of_business: String,
    pub date_count: usize,
    pub series: IntradaySeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<IntradayPivotTable>,
    pub has_data: bool,
}

async fn fetch_records(
    repo: &dyn VolumeRepository,
    request: &VolumeRequest,
    dates: &[CalendarDay],
) -> RepositoryResult<Vec<IntervalRecord>> {
    if dates.is_empty() {
        debug!(
            "Empty date range {}..{}, skipping fetch",
            request.date_range.start, request.date_range.end
        );
        return Ok(Vec::new());
    }
    repo.fetch_interval_records(&request.date_range, &request.line_of_business)
        .await
}

/// Build the day-of-week view for `request`.
pub async fn get_dow_view(
    repo: &dyn VolumeRepository,
    request: &VolumeRequest,
) -> RepositoryResult<DowView> {
    let config = request.config.in_mode(AnalysisMode::Dow);
    let dates = enumerate_dates(&request.date_range);
    let days = available_days(&dates, config.week_start);
    let records = fetch_records(repo, request, &dates).await?;

    let summaries = apply_dow_filter(compute_dow_summaries(&records, &days), config.dow_filter);
    let pivot = build_dow_pivot(&summaries);
    let has_data = summaries.iter().any(DowSummary::has_samples);

    debug!(
        "DOW view for '{}': {} dates, {} records, {} summaries",
        request.line_of_business,
        dates.len(),
        records.len(),
        summaries.len()
    );

    Ok(DowView {
        line_of_business: request.line_of_business.clone(),
        date_count: dates.len(),
        available_days: days,
        summaries,
        pivot,
        has_data,
    })
}

/// Build the intraday view for `request`.
pub async fn get_intraday_view(
    repo: &dyn VolumeRepository,
    request: &VolumeRequest,
) -> RepositoryResult<IntradayView> {
    let config = request.config.in_mode(AnalysisMode::Intraday);
    let dates = enumerate_dates(&request.date_range);
    let records = fetch_records(repo, request, &dates).await?;

    let series = intraday_series(&records, &config);
    let pivot = (config.granularity == Granularity::HalfHour).then(|| {
        let visible_dates: Vec<CalendarDay> = dates
            .iter()
            .filter(|d| day_passes(&config, d.date))
            .cloned()
            .collect();
        build_intraday_pivot(&filter_records(&records, &config), &visible_dates)
    });
    let has_data = !series.points.is_empty();

    debug!(
        "Intraday view for '{}': {} dates, {} points at {:?}",
        request.line_of_business,
        dates.len(),
        series.points.len(),
        config.granularity
    );

    Ok(IntradayView {
        line_of_business: request.line_of_business.clone(),
        date_count: dates.len(),
        series,
        pivot,
        has_data,
    })
}

/// CSV download of the DOW table.
pub async fn get_dow_csv(
    repo: &dyn VolumeRepository,
    request: &VolumeRequest,
    options: CsvExportOptions,
) -> RepositoryResult<String> {
    let view = get_dow_view(repo, request).await?;
    Ok(export_to_csv(&view.summaries, options))
}

/// CSV download of the intraday chart data.
pub async fn get_intraday_csv(
    repo: &dyn VolumeRepository,
    request: &VolumeRequest,
) -> RepositoryResult<String> {
    let view = get_intraday_view(repo, request).await?;
    Ok(export_series_to_csv(&view.series.points))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod dashboard_tests;
