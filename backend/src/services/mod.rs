//! Service layer for aggregation logic and orchestration.
//!
//! The engine modules (`calendar`, `dow`, `filtering`, `time_series`,
//! `pivot`, `export`, `engine`) are pure functions over in-memory records.
//! `dashboard` sits between them and the repository and builds the views
//! served over HTTP.

pub mod calendar;
pub mod dashboard;
pub mod dow;
pub mod engine;
pub mod export;
pub mod filtering;
pub mod pivot;
pub mod time_series;

pub use calendar::{available_days, display_label, enumerate_dates};
pub use dashboard::{
    get_dow_csv, get_dow_view, get_intraday_csv, get_intraday_view, DowView, IntradayView,
    VolumeRequest,
};
pub use dow::{apply_dow_filter, compute_dow_summaries};
pub use engine::{aggregate, intraday_series};
pub use export::{export_series_to_csv, export_to_csv, CsvExportOptions};
pub use filtering::{apply_hour_window, day_passes, filter_records};
pub use pivot::{build_dow_pivot, build_intraday_pivot};
pub use time_series::{build_time_series, month_start_of, overall_average, week_start_of};
