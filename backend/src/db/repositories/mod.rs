//! Repository implementations module.
//!
//! This module contains the implementations of the `VolumeRepository` trait:
//! - `mock`: Seeded synthetic data for demos and local development
//! - `local`: In-memory fixture store for unit testing
pub mod local;
pub mod mock;

pub use local::LocalRepository;
pub use mock::MockRepository;
