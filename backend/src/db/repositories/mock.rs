//! Seeded synthetic volume source.
//!
//! Every day is generated from its own `StdRng` whose seed is a SHA-256
//! digest of `(seed, line_of_business, date)`. A day therefore looks the
//! same no matter which range it was requested in.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::db::repo_config::{LineOfBusinessSettings, MockSettings};
use crate::db::repository::{
    validate_line_of_business, ErrorContext, RepositoryError, RepositoryResult, VolumeRepository,
};
use crate::models::{
    interval_hour, DateRangeBound, DayOfWeek, IntervalCurve, IntervalRecord, DATE_FORMAT,
};

const BUSINESS_HOURS: std::ops::Range<usize> = 8..18;
const BUSINESS_BASE: f64 = 120.0;
const SHOULDER_BASE: f64 = 55.0;
const NIGHT_BASE: f64 = 12.0;
const WEEKEND_FACTOR: f64 = 0.55;

fn is_shoulder_hour(hour: usize) -> bool {
    (6..BUSINESS_HOURS.start).contains(&hour) || (BUSINESS_HOURS.end..21).contains(&hour)
}

fn base_volume(hour: usize) -> f64 {
    if BUSINESS_HOURS.contains(&hour) {
        BUSINESS_BASE
    } else if is_shoulder_hour(hour) {
        SHOULDER_BASE
    } else {
        NIGHT_BASE
    }
}

/// Deterministic generator of half-hour call volumes.
#[derive(Debug, Clone)]
pub struct MockRepository {
    seed: u64,
    lines: Vec<LineOfBusinessSettings>,
}

impl MockRepository {
    /// Mock source with the default lines of business.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            lines: MockSettings::default().lines_of_business,
        }
    }

    /// Mock source built from validated settings.
    pub fn from_settings(settings: &MockSettings) -> RepositoryResult<Self> {
        settings
            .validate()
            .map_err(|e| e.with_operation("create_mock"))?;
        Ok(Self {
            seed: settings.seed,
            lines: settings.lines_of_business.clone(),
        })
    }

    /// Replace the served lines of business.
    pub fn with_lines(mut self, lines: Vec<LineOfBusinessSettings>) -> Self {
        self.lines = lines;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn multiplier(&self, line_of_business: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.name == line_of_business)
            .map(|l| l.multiplier)
    }

    fn day_seed(&self, line_of_business: &str, date: NaiveDate) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(line_of_business.as_bytes());
        hasher.update(date.format(DATE_FORMAT).to_string().as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Generate the record of one day.
    pub fn generate_day(
        &self,
        date: NaiveDate,
        line_of_business: &str,
    ) -> RepositoryResult<IntervalRecord> {
        let multiplier = self
            .multiplier(line_of_business)
            .ok_or_else(|| unknown_line(line_of_business))?;
        let day_factor = if DayOfWeek::of(date).is_weekend() {
            WEEKEND_FACTOR
        } else {
            1.0
        };

        let mut rng = StdRng::seed_from_u64(self.day_seed(line_of_business, date));
        let curve = IntervalCurve::from_fn(|i| {
            let noise: f64 = rng.gen_range(0.8..1.2);
            (base_volume(interval_hour(i)) * multiplier * day_factor * noise).round() as u32
        });

        Ok(IntervalRecord::new(date, line_of_business, curve))
    }

    /// Generate one record per date, in the given order.
    pub fn generate(
        &self,
        dates: &[NaiveDate],
        line_of_business: &str,
    ) -> RepositoryResult<Vec<IntervalRecord>> {
        dates
            .iter()
            .map(|date| self.generate_day(*date, line_of_business))
            .collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new(MockSettings::default().seed)
    }
}

fn unknown_line(line_of_business: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Unknown line of business '{}'", line_of_business),
        ErrorContext::new("fetch_interval_records")
            .with_entity("line_of_business")
            .with_entity_id(line_of_business),
    )
}

#[async_trait]
impl VolumeRepository for MockRepository {
    async fn fetch_interval_records(
        &self,
        range: &DateRangeBound,
        line_of_business: &str,
    ) -> RepositoryResult<Vec<IntervalRecord>> {
        validate_line_of_business(line_of_business)?;
        if self.multiplier(line_of_business).is_none() {
            return Err(unknown_line(line_of_business));
        }

        let Some((start, end)) = range.resolve() else {
            debug!(
                "Invalid date range {}..{}, returning no records",
                range.start, range.end
            );
            return Ok(Vec::new());
        };

        let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
        let records = self.generate(&dates, line_of_business)?;

        debug!(
            "Generated {} mock records for '{}' (seed {})",
            records.len(),
            line_of_business,
            self.seed
        );
        Ok(records)
    }

    async fn list_lines_of_business(&self) -> RepositoryResult<Vec<String>> {
        let mut names: Vec<String> = self.lines.iter().map(|l| l.name.clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
