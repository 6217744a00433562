pub mod aggregation;
pub mod calendar;
pub mod config;
pub mod volume;

pub use aggregation::*;
pub use calendar::*;
pub use config::*;
pub use volume::*;
