//! Data models for configuration and measurement results

pub mod config;
pub mod metrics;

pub use config::Config;
pub use metrics::{server_timing_millis, PassStats, SpeedTestResult, TransferSample};
