//! HTTP client construction and measurement endpoint URLs
//!
//! One `reqwest::Client` is built per session and reused for every transfer
//! in both passes, so connections stay pooled and keep-alive. When a pinned
//! edge IP is configured the client forces every connection for the
//! measurement host to dial that address on port 443 while TLS/SNI and the
//! Host header keep the original hostname, preserving virtual-host routing.

use crate::defaults::CONNECT_TIMEOUT;
use crate::error::{AppError, Result};
use crate::models::Config;
use reqwest::Client;
use std::net::SocketAddr;
use url::Url;

/// Build the session's HTTP client from the configuration
pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

    if let Some(ip) = config.pinned_addr() {
        let host = base_host(&config.base_url)?;
        builder = builder.resolve_to_addrs(&host, &[SocketAddr::new(ip, 443)]);
    }

    builder
        .build()
        .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Extract the host component of the measurement base URL
pub fn base_host(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)?;
    parsed
        .host_str()
        .map(|h| h.to_string())
        .ok_or_else(|| AppError::validation("Base URL must have a host"))
}

/// URL for the upload endpoint, tagged with the session id
pub fn upload_url(base_url: &str, meas_id: i64) -> Result<Url> {
    let mut url = Url::parse(base_url)?.join("__up")?;
    url.query_pairs_mut()
        .append_pair("measId", &meas_id.to_string());
    Ok(url)
}

/// URL for the download endpoint, tagged with the session id and the number
/// of bytes the service should stream back
pub fn download_url(base_url: &str, meas_id: i64, bytes: u64) -> Result<Url> {
    let mut url = Url::parse(base_url)?.join("__down")?;
    url.query_pairs_mut()
        .append_pair("measId", &meas_id.to_string())
        .append_pair("bytes", &bytes.to_string());
    Ok(url)
}
