//! Pure measurement math: Server-Timing extraction, per-transfer samples
//! and pass aggregation.
//!
//! Everything in this module is side-effect free so the formulas can be unit
//! tested without touching the network. The session layer produces samples;
//! this module folds them into throughput and latency figures.

use crate::defaults::BYTES_PER_MEGABIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parse a `Server-Timing` style header value of the form `<name>=<number>`
/// into a duration, rounded to the nearest millisecond.
///
/// The numeric portion is whatever follows the first `=`. A missing
/// delimiter, an unparseable number or a negative value all degrade to
/// `Duration::ZERO`: a malformed header loses the correction for that one
/// transfer but never fails the measurement.
pub fn server_timing_millis(value: &str) -> Duration {
    let millis = value
        .split_once('=')
        .and_then(|(_, num)| num.trim().parse::<f64>().ok())
        .map(f64::round)
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .unwrap_or(0.0);

    Duration::from_millis(millis as u64)
}

/// A single timed transfer: observed round-trip wall time plus the
/// server-reported processing time extracted from its response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSample {
    /// Wall-clock time from request issue to response completion
    pub wall_time: Duration,

    /// Server-side processing time reported via `Server-Timing`
    pub server_time: Duration,
}

impl TransferSample {
    pub fn new(wall_time: Duration, server_time: Duration) -> Self {
        Self {
            wall_time,
            server_time,
        }
    }

    /// Corrected latency: wall time minus server processing time.
    ///
    /// Saturates at zero when the server reports more processing time than
    /// the whole round trip took (clock skew, bogus header).
    pub fn corrected(&self) -> Duration {
        self.wall_time.saturating_sub(self.server_time)
    }
}

/// Aggregated figures for one measurement pass (upload or download)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassStats {
    /// Average throughput in megabits per second
    pub speed_mbps: f64,

    /// Average corrected latency per transfer
    pub avg_latency: Duration,
}

impl PassStats {
    /// Fold a pass's total corrected latency into throughput and latency
    /// averages.
    ///
    /// Throughput is `(payload_bytes * count) / total_seconds / 125000`,
    /// yielding Mb/s; latency is `total / count`. Derived strictly from
    /// corrected latency, never from raw wall time.
    pub fn aggregate(payload_bytes: u64, transfer_count: u32, total_corrected: Duration) -> Self {
        // Multiplied as f64: the product feeds a float division anyway, and
        // u64 arithmetic would overflow for extreme payload sizes.
        let total_bytes = payload_bytes as f64 * transfer_count as f64;
        let speed_mbps = total_bytes / total_corrected.as_secs_f64() / BYTES_PER_MEGABIT;
        let avg_latency = total_corrected / transfer_count.max(1);

        Self {
            speed_mbps,
            avg_latency,
        }
    }

    /// Average latency in milliseconds, for display
    pub fn latency_ms(&self) -> f64 {
        self.avg_latency.as_secs_f64() * 1000.0
    }
}

/// Result of one complete speed test run: both passes, all-or-nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTestResult {
    /// Average upload throughput (Mb/s)
    pub avg_upload_speed_mbps: f64,

    /// Average download throughput (Mb/s)
    pub avg_download_speed_mbps: f64,

    /// Average corrected upload latency
    pub avg_upload_latency: Duration,

    /// Average corrected download latency
    pub avg_download_latency: Duration,

    /// Session correlation id carried by every request of this run
    pub meas_id: i64,

    /// When the run completed
    pub completed_at: DateTime<Utc>,
}

impl SpeedTestResult {
    /// Assemble a result from the two pass summaries
    pub fn new(upload: PassStats, download: PassStats, meas_id: i64) -> Self {
        Self {
            avg_upload_speed_mbps: upload.speed_mbps,
            avg_download_speed_mbps: download.speed_mbps,
            avg_upload_latency: upload.avg_latency,
            avg_download_latency: download.avg_latency,
            meas_id,
            completed_at: Utc::now(),
        }
    }

    pub fn upload(&self) -> PassStats {
        PassStats {
            speed_mbps: self.avg_upload_speed_mbps,
            avg_latency: self.avg_upload_latency,
        }
    }

    pub fn download(&self) -> PassStats {
        PassStats {
            speed_mbps: self.avg_download_speed_mbps,
            avg_latency: self.avg_download_latency,
        }
    }
}
