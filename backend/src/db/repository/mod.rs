//! Repository trait for volume data sources.
//!
//! The dashboard never talks to a data source directly: every view is
//! computed from the records a [`VolumeRepository`] returns for a date range
//! and line of business. Tests plug in fixed fixtures through
//! `LocalRepository`; demos and local development use the seeded
//! `MockRepository`.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{DateRangeBound, IntervalRecord};

/// Reject a blank line-of-business name before any lookup.
pub fn validate_line_of_business(line_of_business: &str) -> RepositoryResult<()> {
    if line_of_business.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "line_of_business must not be empty",
            ErrorContext::new("fetch_interval_records").with_entity("line_of_business"),
        ));
    }
    Ok(())
}

/// Source of per-day interval records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across handlers.
#[async_trait]
pub trait VolumeRepository: Send + Sync {
    /// Fetch one record per available day of `range` for `line_of_business`.
    ///
    /// # Returns
    /// * `Ok(Vec<IntervalRecord>)` - Records sorted by date; empty for an
    ///   invalid range
    /// * `Err(RepositoryError)` - If the line of business is unknown or the
    ///   source fails
    async fn fetch_interval_records(
        &self,
        range: &DateRangeBound,
        line_of_business: &str,
    ) -> RepositoryResult<Vec<IntervalRecord>>;

    /// Names of the lines of business this source can serve, sorted.
    async fn list_lines_of_business(&self) -> RepositoryResult<Vec<String>>;

    /// Whether the source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
