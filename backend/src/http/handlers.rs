//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! dashboard service for the aggregation work.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::dto::{ExportQuery, HealthResponse, LinesOfBusinessResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::dashboard::{
    get_dow_csv, get_dow_view, get_intraday_csv, get_intraday_view, DowView, IntradayView,
    VolumeRequest,
};
use crate::db::repository::validate_line_of_business;
use crate::models::DATE_FORMAT;
use crate::services::export::CsvExportOptions;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Longest accepted date range, in days (about ten years).
pub const MAX_RANGE_DAYS: usize = 3660;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

fn validate_request(request: &VolumeRequest) -> Result<(), AppError> {
    validate_line_of_business(&request.line_of_business)?;
    let days = request.date_range.day_count();
    if days > MAX_RANGE_DAYS {
        return Err(AppError::BadRequest(format!(
            "Date range spans {} days, the maximum is {}",
            days, MAX_RANGE_DAYS
        )));
    }
    Ok(())
}

fn slug(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Download name for an export. Unusable ranges fall back to `<kind>.csv`.
fn export_filename(kind: &str, request: &VolumeRequest) -> String {
    match request.date_range.resolve() {
        Some((start, end)) => format!(
            "{}_{}_{}_{}.csv",
            kind,
            slug(&request.line_of_business),
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        ),
        None => format!("{}.csv", kind),
    }
}

fn csv_response(filename: String, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the data source responds.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Lines of business
// =============================================================================

/// GET /v1/lines-of-business
pub async fn list_lines_of_business(
    State(state): State<AppState>,
) -> HandlerResult<LinesOfBusinessResponse> {
    let lines_of_business = state.repository.list_lines_of_business().await?;
    let total = lines_of_business.len();

    Ok(Json(LinesOfBusinessResponse {
        lines_of_business,
        total,
    }))
}

// =============================================================================
// Volume views
// =============================================================================

/// POST /v1/volume/dow
///
/// Average half-hour curve per weekday over the requested range.
pub async fn get_dow(
    State(state): State<AppState>,
    Json(request): Json<VolumeRequest>,
) -> HandlerResult<DowView> {
    validate_request(&request)?;
    let view = get_dow_view(state.repository.as_ref(), &request).await?;
    Ok(Json(view))
}

/// POST /v1/volume/intraday
///
/// Chart series at the requested granularity after the intraday filters.
pub async fn get_intraday(
    State(state): State<AppState>,
    Json(request): Json<VolumeRequest>,
) -> HandlerResult<IntradayView> {
    validate_request(&request)?;
    let view = get_intraday_view(state.repository.as_ref(), &request).await?;
    Ok(Json(view))
}

// =============================================================================
// CSV exports
// =============================================================================

/// POST /v1/volume/dow/export?totals=true
pub async fn export_dow(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(request): Json<VolumeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let options = CsvExportOptions {
        include_totals_row: query.totals.unwrap_or(false),
    };
    let body = get_dow_csv(state.repository.as_ref(), &request, options).await?;
    tracing::debug!("Exported DOW CSV for '{}'", request.line_of_business);
    Ok(csv_response(export_filename("dow", &request), body))
}

/// POST /v1/volume/intraday/export
pub async fn export_intraday(
    State(state): State<AppState>,
    Json(request): Json<VolumeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let body = get_intraday_csv(state.repository.as_ref(), &request).await?;
    tracing::debug!("Exported intraday CSV for '{}'", request.line_of_business);
    Ok(csv_response(export_filename("intraday", &request), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepositoryError;
    use crate::models::{AggregationConfig, DateRangeBound};

    #[test]
    fn test_validate_request() {
        let ok = VolumeRequest::new(
            DateRangeBound::new("2024-01-01", "2024-12-31"),
            "Billing",
            AggregationConfig::dow(),
        );
        assert!(validate_request(&ok).is_ok());

        let blank = VolumeRequest::new(
            DateRangeBound::new("2024-01-01", "2024-01-02"),
            "  ",
            AggregationConfig::dow(),
        );
        assert!(matches!(
            validate_request(&blank),
            Err(AppError::Repository(RepositoryError::ValidationError { .. }))
        ));

        let too_long = VolumeRequest::new(
            DateRangeBound::new("2000-01-01", "2024-01-01"),
            "Billing",
            AggregationConfig::dow(),
        );
        assert!(matches!(validate_request(&too_long), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_export_filename() {
        let request = VolumeRequest::new(
            DateRangeBound::new("2024-03-01", "2024-03-31"),
            "Premium Orders",
            AggregationConfig::dow(),
        );
        assert_eq!(
            export_filename("dow", &request),
            "dow_premium_orders_2024-03-01_2024-03-31.csv"
        );
    }

    #[test]
    fn test_export_filename_ignores_unparseable_bounds() {
        let request = VolumeRequest::new(
            DateRangeBound::new("2024-03-09\u{1}", "2024-03-16\""),
            "Billing",
            AggregationConfig::dow(),
        );
        assert_eq!(export_filename("intraday", &request), "intraday.csv");

        let reversed = VolumeRequest::new(
            DateRangeBound::new("2024-03-16", "2024-03-09"),
            "Billing",
            AggregationConfig::dow(),
        );
        assert_eq!(export_filename("dow", &reversed), "dow.csv");
    }
}
