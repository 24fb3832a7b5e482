//! Measurement session: the upload and download passes
//!
//! A `SpeedTester` owns one pooled HTTP client and a session correlation id,
//! runs both passes strictly sequentially, and folds the per-transfer
//! corrected latencies into the pass aggregates from `models::metrics`.
//! A single transport failure aborts the whole run; there are no retries and
//! no partial results.

use crate::client::{build_client, download_url, upload_url};
use crate::error::{AppError, Result};
use crate::models::{server_timing_millis, Config, PassStats, SpeedTestResult, TransferSample};
use crate::output;
use bytes::Bytes;
use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::{Duration, Instant};

/// Runs one complete speed test: an upload pass followed by a download pass
pub struct SpeedTester {
    config: Config,
    client: Client,
    meas_id: i64,
}

impl SpeedTester {
    /// Create a session with a freshly drawn correlation id
    pub fn new(config: Config) -> Result<Self> {
        let meas_id = rand::thread_rng().gen_range(0..=i64::MAX);
        Self::with_meas_id(config, meas_id)
    }

    /// Create a session with a fixed correlation id. Lets tests assert exact
    /// query strings instead of working around global randomness.
    pub fn with_meas_id(config: Config, meas_id: i64) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            meas_id,
        })
    }

    /// The correlation id carried by every request of this run
    pub fn meas_id(&self) -> i64 {
        self.meas_id
    }

    /// Run both measurement passes and return the combined result.
    ///
    /// All-or-nothing: a failure in either pass aborts the run with an error
    /// naming the pass, and any already-computed upload figures are dropped.
    pub async fn run(&self) -> Result<SpeedTestResult> {
        let upload = self.upload_pass().await?;
        let download = self.download_pass().await?;

        Ok(SpeedTestResult::new(upload, download, self.meas_id))
    }

    /// Upload pass: POST the fixed payload `transfer_count` times
    async fn upload_pass(&self) -> Result<PassStats> {
        let url = upload_url(&self.config.base_url, self.meas_id)
            .map_err(|e| AppError::upload(format!("failed to build upload URL: {}", e)))?;

        // The payload content is irrelevant, only its size matters. Built
        // once; Bytes clones are refcounted, not copies.
        let body = Bytes::from(vec![0x30u8; self.config.payload_bytes as usize]);

        let mut total_corrected = Duration::ZERO;

        for _ in 0..self.config.transfer_count {
            let start = Instant::now();

            let response = self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
                .body(body.clone())
                .send()
                .await
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| AppError::upload(format!("request to {} failed: {}", url, e)))?;

            let wall_time = start.elapsed();
            let sample = TransferSample::new(wall_time, server_timing(&response));
            total_corrected += sample.corrected();

            if self.config.verbose {
                output::report_transfer("Upload", self.config.payload_bytes, &sample);
            }
        }

        Ok(PassStats::aggregate(
            self.config.payload_bytes,
            self.config.transfer_count,
            total_corrected,
        ))
    }

    /// Download pass: GET `payload_bytes` streamed bytes `transfer_count`
    /// times. The clock stops only after the full body has been drained, so
    /// the figures reflect the whole payload transfer, not header arrival.
    async fn download_pass(&self) -> Result<PassStats> {
        let url = download_url(&self.config.base_url, self.meas_id, self.config.payload_bytes)
            .map_err(|e| AppError::download(format!("failed to build download URL: {}", e)))?;

        let mut total_corrected = Duration::ZERO;

        for _ in 0..self.config.transfer_count {
            let start = Instant::now();

            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| AppError::download(format!("request to {} failed: {}", url, e)))?;

            // Headers carry the server time; read them before consuming the body
            let server_time = server_timing(&response);

            response
                .bytes()
                .await
                .map_err(|e| AppError::download(format!("failed to read body from {}: {}", url, e)))?;

            let wall_time = start.elapsed();
            let sample = TransferSample::new(wall_time, server_time);
            total_corrected += sample.corrected();

            if self.config.verbose {
                output::report_transfer("Download", self.config.payload_bytes, &sample);
            }
        }

        Ok(PassStats::aggregate(
            self.config.payload_bytes,
            self.config.transfer_count,
            total_corrected,
        ))
    }
}

/// Extract the server-reported processing time from a response. Absent or
/// malformed headers degrade to zero correction.
fn server_timing(response: &Response) -> Duration {
    response
        .headers()
        .get("server-timing")
        .and_then(|value| value.to_str().ok())
        .map(server_timing_millis)
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.payload_bytes = 64;
        config.transfer_count = 2;
        config
    }

    #[test]
    fn test_fresh_session_id_is_non_negative() {
        let tester = SpeedTester::new(small_config()).unwrap();
        assert!(tester.meas_id() >= 0);
    }

    #[test]
    fn test_injected_id_is_stable() {
        let tester = SpeedTester::with_meas_id(small_config(), 777).unwrap();
        assert_eq!(tester.meas_id(), 777);
        assert_eq!(tester.meas_id(), 777);
    }

    #[test]
    fn test_injected_id_produces_exact_query_strings() {
        let config = small_config();
        let tester = SpeedTester::with_meas_id(config.clone(), 42).unwrap();

        let up = upload_url(&config.base_url, tester.meas_id()).unwrap();
        assert_eq!(up.as_str(), "https://speed.cloudflare.com/__up?measId=42");

        let down = download_url(&config.base_url, tester.meas_id(), config.payload_bytes).unwrap();
        assert_eq!(
            down.as_str(),
            "https://speed.cloudflare.com/__down?measId=42&bytes=64"
        );
    }

    #[test]
    fn test_session_with_pinned_ip_constructs() {
        let mut config = small_config();
        config.pinned_ip = Some("162.159.140.221".to_string());
        assert!(SpeedTester::new(config).is_ok());
    }
}
