use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::DayOfWeek;

/// Half-hour slots in one day.
pub const INTERVALS_PER_DAY: usize = 48;

pub const HOURS_PER_DAY: usize = 24;

/// Hour of day covered by half-hour slot `index`.
pub fn interval_hour(index: usize) -> usize {
    index / 2
}

/// `HH:MM` start time of half-hour slot `index`.
pub fn interval_label(index: usize) -> String {
    format!("{:02}:{:02}", interval_hour(index), (index % 2) * 30)
}

/// One day's volume curve: exactly 48 non-negative half-hour counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalCurve([u32; INTERVALS_PER_DAY]);

impl IntervalCurve {
    pub fn new(values: [u32; INTERVALS_PER_DAY]) -> Self {
        Self(values)
    }

    pub fn zeroed() -> Self {
        Self([0; INTERVALS_PER_DAY])
    }

    /// Curve with the same value in every slot.
    pub fn uniform(value: u32) -> Self {
        Self([value; INTERVALS_PER_DAY])
    }

    /// Build a curve from a per-slot function.
    pub fn from_fn(f: impl FnMut(usize) -> u32) -> Self {
        Self(std::array::from_fn(f))
    }

    pub fn values(&self) -> &[u32; INTERVALS_PER_DAY] {
        &self.0
    }

    pub fn get(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Sum of all 48 slots.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v)).sum()
    }

    /// Hourly sums of consecutive half-hour pairs.
    pub fn hourly_totals(&self) -> [u64; HOURS_PER_DAY] {
        std::array::from_fn(|h| u64::from(self.0[2 * h]) + u64::from(self.0[2 * h + 1]))
    }

    /// Copy with slots zeroed wherever `keep(index)` is false.
    pub fn masked(&self, keep: impl Fn(usize) -> bool) -> Self {
        Self::from_fn(|i| if keep(i) { self.0[i] } else { 0 })
    }
}

impl Default for IntervalCurve {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl TryFrom<Vec<u32>> for IntervalCurve {
    type Error = String;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        let len = values.len();
        let array: [u32; INTERVALS_PER_DAY] = values.try_into().map_err(|_| {
            format!(
                "Interval curve must have exactly {} values, got {}",
                INTERVALS_PER_DAY, len
            )
        })?;
        Ok(Self(array))
    }
}

impl From<IntervalCurve> for Vec<u32> {
    fn from(curve: IntervalCurve) -> Self {
        curve.0.to_vec()
    }
}

/// Volume for one calendar day and line of business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub line_of_business: String,
    pub intervals: IntervalCurve,
}

impl IntervalRecord {
    /// Create a record; the weekday is derived from `date`.
    pub fn new(date: NaiveDate, line_of_business: impl Into<String>, intervals: IntervalCurve) -> Self {
        Self {
            date,
            day_of_week: DayOfWeek::of(date),
            line_of_business: line_of_business.into(),
            intervals,
        }
    }

    pub fn total(&self) -> u64 {
        self.intervals.total()
    }
}
