//! Data Transfer Objects for the HTTP API.
//!
//! Request and view types are re-exported from the service layer since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    AggregationConfig, DateRangeBound, DowSummary, DowView, IntradaySeries, IntradayView,
    VolumeRequest,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Data source status
    pub repository: String,
}

/// Lines of business the data source can serve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinesOfBusinessResponse {
    pub lines_of_business: Vec<String>,
    pub total: usize,
}

/// Query parameters of the CSV export endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    /// Append the `Total` footer row to the DOW table
    pub totals: Option<bool>,
}
