use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ISO calendar date format accepted for range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday names as shown in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Monday-first ordering.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    /// Position of this day in a week that starts on `week_start` (0-based).
    pub fn position(self, week_start: WeekStart) -> usize {
        let from_monday = self.to_weekday().num_days_from_monday() as usize;
        match week_start {
            WeekStart::Monday => from_monday,
            WeekStart::Sunday => (from_monday + 1) % 7,
        }
    }

    /// All seven days in display order for the given week start.
    pub fn ordered(week_start: WeekStart) -> [DayOfWeek; 7] {
        let mut days = Self::ALL;
        days.sort_by_key(|d| d.position(week_start));
        days
    }

    pub fn to_weekday(self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Accepts full names or three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.name().to_lowercase() == needle || d.short_name().to_lowercase() == needle)
            .ok_or_else(|| format!("Unknown day of week: {}", s))
    }
}

/// First day of the week used when ordering DOW output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

/// Calendar months, serialized by full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonthOfYear {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthOfYear {
    pub const ALL: [MonthOfYear; 12] = [
        MonthOfYear::January,
        MonthOfYear::February,
        MonthOfYear::March,
        MonthOfYear::April,
        MonthOfYear::May,
        MonthOfYear::June,
        MonthOfYear::July,
        MonthOfYear::August,
        MonthOfYear::September,
        MonthOfYear::October,
        MonthOfYear::November,
        MonthOfYear::December,
    ];

    pub fn of(date: NaiveDate) -> Self {
        // month() is always within 1..=12
        Self::ALL[date.month0() as usize]
    }

    /// Month number, 1 = January.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            MonthOfYear::January => "January",
            MonthOfYear::February => "February",
            MonthOfYear::March => "March",
            MonthOfYear::April => "April",
            MonthOfYear::May => "May",
            MonthOfYear::June => "June",
            MonthOfYear::July => "July",
            MonthOfYear::August => "August",
            MonthOfYear::September => "September",
            MonthOfYear::October => "October",
            MonthOfYear::November => "November",
            MonthOfYear::December => "December",
        }
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonthOfYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == needle || name[..3] == needle
            })
            .ok_or_else(|| format!("Unknown month: {}", s))
    }
}

/// Inclusive date range as entered in the dashboard filters.
///
/// Bounds are kept as raw strings: a bound that fails to parse, or a
/// reversed range, resolves to `None` and is treated as "no data".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeBound {
    pub start: String,
    pub end: String,
}

impl DateRangeBound {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            start.format(DATE_FORMAT).to_string(),
            end.format(DATE_FORMAT).to_string(),
        )
    }

    /// Parsed `(start, end)` when both bounds are valid and `start <= end`.
    pub fn resolve(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start.trim(), DATE_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(self.end.trim(), DATE_FORMAT).ok()?;
        (start <= end).then_some((start, end))
    }

    /// Number of calendar days covered, 0 for an invalid range.
    pub fn day_count(&self) -> usize {
        self.resolve()
            .map(|(start, end)| (end - start).num_days() as usize + 1)
            .unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.resolve()
            .map(|(start, end)| start <= date && date <= end)
            .unwrap_or(false)
    }
}

/// One enumerated calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub display_label: String,
}
