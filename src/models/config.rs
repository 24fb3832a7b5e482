//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pinned edge-node IP address. When set, every connection dials this
    /// address on port 443 regardless of the requested hostname; empty/None
    /// means ordinary DNS resolution.
    #[serde(default)]
    pub pinned_ip: Option<String>,

    /// Base URL of the measurement service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Size of each transfer payload in bytes
    #[serde(default = "default_payload_bytes")]
    pub payload_bytes: u64,

    /// Number of transfers per measurement pass
    #[serde(default = "default_transfer_count")]
    pub transfer_count: u32,

    /// Enable per-transfer diagnostic output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Render the result record as JSON
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pinned_ip: None,
            base_url: default_base_url(),
            payload_bytes: default_payload_bytes(),
            transfer_count: default_transfer_count(),
            verbose: false,
            debug: false,
            enable_color: default_enable_color(),
            json: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ip) = &self.pinned_ip {
            if IpAddr::from_str(ip).is_err() {
                return Err(AppError::config(format!(
                    "Invalid pinned IP address: {}",
                    ip
                )));
            }
        }

        if self.base_url.is_empty() {
            return Err(AppError::config("Base URL cannot be empty"));
        }
        match url::Url::parse(&self.base_url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::config(format!(
                        "Base URL must use http or https: {}",
                        self.base_url
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(AppError::config("Base URL must have a host"));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "Invalid base URL '{}': {}",
                    self.base_url, e
                )));
            }
        }

        if self.payload_bytes == 0 {
            return Err(AppError::config("Payload size must be greater than 0"));
        }

        if self.transfer_count == 0 {
            return Err(AppError::config("Transfer count must be greater than 0"));
        }

        if self.transfer_count > 100 {
            return Err(AppError::config("Transfer count cannot exceed 100"));
        }

        Ok(())
    }

    /// Parsed pinned IP, if configured. `validate()` must have passed.
    pub fn pinned_addr(&self) -> Option<IpAddr> {
        self.pinned_ip
            .as_deref()
            .and_then(|ip| IpAddr::from_str(ip).ok())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(ip) = std::env::var("CF_SPEEDTEST_IP") {
            let ip = ip.trim().to_string();
            self.pinned_ip = if ip.is_empty() { None } else { Some(ip) };
        }

        if let Ok(base_url) = std::env::var("CF_SPEEDTEST_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }

        if let Ok(bytes) = std::env::var("CF_SPEEDTEST_BYTES") {
            self.payload_bytes = bytes.parse().map_err(|e| {
                AppError::config(format!("Invalid CF_SPEEDTEST_BYTES value '{}': {}", bytes, e))
            })?;
        }

        if let Ok(count) = std::env::var("CF_SPEEDTEST_COUNT") {
            self.transfer_count = count.parse().map_err(|e| {
                AppError::config(format!("Invalid CF_SPEEDTEST_COUNT value '{}': {}", count, e))
            })?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_base_url() -> String {
    crate::defaults::DEFAULT_BASE_URL.to_string()
}

fn default_payload_bytes() -> u64 {
    crate::defaults::DEFAULT_PAYLOAD_BYTES
}

fn default_transfer_count() -> u32 {
    crate::defaults::DEFAULT_TRANSFER_COUNT
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
