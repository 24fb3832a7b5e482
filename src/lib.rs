//! Cloudflare Speed Tester
//!
//! Measures upload and download throughput and latency against Cloudflare's
//! speed test endpoints (`__up` / `__down`), correcting each sample with the
//! server-reported `Server-Timing` processing time so that figures reflect
//! network transit rather than edge-side queuing.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod session;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, PassStats, SpeedTestResult, TransferSample};
pub use output::{ColoredFormatter, OutputFormatterFactory, PlainFormatter, ResultFormatter};
pub use session::SpeedTester;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://speed.cloudflare.com";
    pub const DEFAULT_PAYLOAD_BYTES: u64 = 10 * 1024 * 1024;
    pub const DEFAULT_TRANSFER_COUNT: u32 = 5;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Connection-establishment timeout. There is deliberately no read
    /// timeout: a large transfer may legitimately take minutes.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// One megabit per second is 125000 bytes per second.
    pub const BYTES_PER_MEGABIT: f64 = 125_000.0;
}
