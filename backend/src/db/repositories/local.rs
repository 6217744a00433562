//! In-memory repository implementation for unit testing and local development.
//!
//! Records are keyed by line of business and date, so inserting a record for
//! an existing `(line_of_business, date)` replaces it.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

use crate::db::repository::{
    validate_line_of_business, ErrorContext, RepositoryError, RepositoryResult, VolumeRepository,
};
use crate::models::{DateRangeBound, IntervalRecord};

type RecordStore = HashMap<String, BTreeMap<NaiveDate, IntervalRecord>>;

/// Fixture store of interval records.
#[derive(Debug, Default)]
pub struct LocalRepository {
    records: RwLock<RecordStore>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = IntervalRecord>) -> Self {
        let repo = Self::new();
        repo.insert_records(records);
        repo
    }

    /// Insert records, replacing any existing record for the same day and
    /// line of business.
    pub fn insert_records(&self, records: impl IntoIterator<Item = IntervalRecord>) {
        let mut store = self.records.write();
        for record in records {
            store
                .entry(record.line_of_business.clone())
                .or_default()
                .insert(record.date, record);
        }
    }

    /// Total number of stored records across all lines of business.
    pub fn record_count(&self) -> usize {
        self.records.read().values().map(BTreeMap::len).sum()
    }

    /// Drop every stored record.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

#[async_trait]
impl VolumeRepository for LocalRepository {
    async fn fetch_interval_records(
        &self,
        range: &DateRangeBound,
        line_of_business: &str,
    ) -> RepositoryResult<Vec<IntervalRecord>> {
        validate_line_of_business(line_of_business)?;
        let store = self.records.read();
        let by_date = store.get(line_of_business).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Unknown line of business '{}'", line_of_business),
                ErrorContext::new("fetch_interval_records")
                    .with_entity("line_of_business")
                    .with_entity_id(line_of_business),
            )
        })?;

        let Some((start, end)) = range.resolve() else {
            debug!(
                "Invalid date range {}..{}, returning no records",
                range.start, range.end
            );
            return Ok(Vec::new());
        };

        let records: Vec<IntervalRecord> =
            by_date.range(start..=end).map(|(_, r)| r.clone()).collect();
        debug!(
            "Fetched {} local records for '{}'",
            records.len(),
            line_of_business
        );
        Ok(records)
    }

    async fn list_lines_of_business(&self) -> RepositoryResult<Vec<String>> {
        let mut names: Vec<String> = self.records.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalCurve;

    fn record(day: u32, lob: &str, value: u32) -> IntervalRecord {
        IntervalRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            lob,
            IntervalCurve::uniform(value),
        )
    }

    #[tokio::test]
    async fn test_fetch_filters_range_and_sorts() {
        let repo = LocalRepository::with_records(vec![
            record(12, "Billing", 3),
            record(2, "Billing", 1),
            record(7, "Billing", 2),
            record(7, "Retention", 9),
        ]);

        let records = repo
            .fetch_interval_records(&DateRangeBound::new("2024-03-01", "2024-03-10"), "Billing")
            .await
            .unwrap();
        let days: Vec<u32> = records.iter().map(|r| r.intervals.get(0)).collect();
        assert_eq!(days, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_insert_replaces_same_day() {
        let repo = LocalRepository::new();
        repo.insert_records(vec![record(4, "Billing", 1)]);
        repo.insert_records(vec![record(4, "Billing", 5)]);
        assert_eq!(repo.record_count(), 1);

        let records = repo
            .fetch_interval_records(&DateRangeBound::new("2024-03-04", "2024-03-04"), "Billing")
            .await
            .unwrap();
        assert_eq!(records[0].intervals.get(10), 5);
    }

    #[tokio::test]
    async fn test_unknown_line_and_invalid_range() {
        let repo = LocalRepository::with_records(vec![record(1, "Billing", 1)]);

        let err = repo
            .fetch_interval_records(&DateRangeBound::new("2024-03-01", "2024-03-02"), "Sales")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));

        let blank = repo
            .fetch_interval_records(&DateRangeBound::new("2024-03-01", "2024-03-02"), "")
            .await
            .unwrap_err();
        assert!(matches!(blank, RepositoryError::ValidationError { .. }));

        let none = repo
            .fetch_interval_records(&DateRangeBound::new("2024-03-05", "2024-03-01"), "Billing")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_and_clear() {
        let repo = LocalRepository::with_records(vec![
            record(1, "Retention", 1),
            record(1, "Billing", 1),
        ]);
        assert_eq!(
            repo.list_lines_of_business().await.unwrap(),
            vec!["Billing".to_string(), "Retention".to_string()]
        );

        repo.clear();
        assert_eq!(repo.record_count(), 0);
        assert!(repo.list_lines_of_business().await.unwrap().is_empty());
    }
}
