//! # TCI Rust Backend
//!
//! Call volume aggregation engine for the contact-center dashboard.
//!
//! Raw data is one record per calendar day and line of business, holding 48
//! half-hour call counts. The engine turns a date range of such records into
//! the two dashboard views:
//!
//! - **Day of week**: average half-hour curve per weekday with per-slot
//!   percentage shares and a pivot table
//! - **Intraday**: a chart series at half-hour, hourly, daily, weekly or
//!   monthly granularity, after period, weekday and hour-window filters
//!
//! Both views can be downloaded as CSV.
//!
//! ## Architecture
//!
//! - [`models`]: Records, calendar types, aggregation config and outputs
//! - [`services`]: The pure aggregation engine and the dashboard service
//! - [`db`]: Repository trait plus the mock and in-memory data sources
//! - [`api`]: Public re-exports of the types above
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ```ignore
//! use tci_backend::api::*;
//!
//! let dates = enumerate_dates(&DateRangeBound::new("2024-03-01", "2024-03-31"));
//! let days = available_days(&dates, WeekStart::Monday);
//! let output = aggregate(&records, &AggregationConfig::dow(), &days);
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
