#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{Duration, NaiveDate};
use tci_backend::api::{IntervalCurve, IntervalRecord, LocalRepository};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on drop, including on unwind, and access is
/// serialized since tests share the process environment.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::apply(changes);
    f()
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            set_or_remove(key, value.as_deref());
        }
        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `days` consecutive records from `first`, day `n` holding `n + 1` in every slot.
pub fn ramp_records(first: NaiveDate, days: i64, line_of_business: &str) -> Vec<IntervalRecord> {
    (0..days)
        .map(|n| {
            IntervalRecord::new(
                first + Duration::days(n),
                line_of_business,
                IntervalCurve::uniform(n as u32 + 1),
            )
        })
        .collect()
}

/// The two-Saturday fixture: 100 per slot on 2024-03-09, 200 on 2024-03-16.
pub fn two_saturdays(line_of_business: &str) -> Vec<IntervalRecord> {
    vec![
        IntervalRecord::new(date(2024, 3, 9), line_of_business, IntervalCurve::uniform(100)),
        IntervalRecord::new(date(2024, 3, 16), line_of_business, IntervalCurve::uniform(200)),
    ]
}

pub fn fixture_repository() -> LocalRepository {
    let repo = LocalRepository::with_records(two_saturdays("Premium Orders"));
    repo.insert_records(ramp_records(date(2024, 3, 4), 14, "Billing"));
    repo
}
