//! Synchronization core: rate gates, lag estimation, and trimming.

pub mod engine;
pub mod lags;
pub mod rates;
pub mod trimmer;

pub use engine::SyncEngine;
pub use lags::{LagEstimator, LagTable};
pub use rates::check_equal;
pub use trimmer::Trimmer;
