//! Configuration loading pipeline: defaults, .env file, environment
//! variables, then CLI flags (highest precedence), validated last.

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::models::Config;

/// Load and validate the effective configuration for this run
pub fn load_config(cli: Cli) -> Result<Config> {
    cli.validate().map_err(AppError::validation)?;

    // Pick up a .env file if one is present; absence is not an error
    dotenv::dotenv().ok();

    let mut config = Config::default();
    config.merge_from_env()?;

    // CLI flags win over environment
    if let Some(ip) = cli.pinned_ip.clone() {
        config.pinned_ip = if ip.is_empty() { None } else { Some(ip) };
    }
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    if let Some(bytes) = cli.payload_bytes {
        config.payload_bytes = bytes;
    }
    if let Some(count) = cli.count {
        config.transfer_count = count;
    }
    config.verbose = cli.verbose;
    config.debug = cli.debug;
    config.json = cli.json;
    config.enable_color = cli.use_colors();

    config.validate()?;
    Ok(config)
}

/// Human-readable configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = String::new();

    summary.push_str(&format!(
        "  Target: {}\n",
        match &config.pinned_ip {
            Some(ip) => format!("{} (pinned to {})", config.base_url, ip),
            None => config.base_url.clone(),
        }
    ));
    summary.push_str(&format!("  Payload size: {} bytes\n", config.payload_bytes));
    summary.push_str(&format!("  Transfers per pass: {}\n", config.transfer_count));
    summary.push_str(&format!("  Verbose: {}\n", config.verbose));
    summary.push_str(&format!("  Colored output: {}\n", config.enable_color));

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            pinned_ip: None,
            base_url: None,
            payload_bytes: None,
            count: None,
            verbose: false,
            debug: false,
            color: false,
            no_color: true,
            json: false,
        }
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(bare_cli()).unwrap();
        assert_eq!(config.base_url, crate::defaults::DEFAULT_BASE_URL);
        assert_eq!(config.transfer_count, crate::defaults::DEFAULT_TRANSFER_COUNT);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let mut cli = bare_cli();
        cli.pinned_ip = Some("162.159.140.221".to_string());
        cli.payload_bytes = Some(4096);
        cli.count = Some(3);
        cli.verbose = true;

        let config = load_config(cli).unwrap();
        assert_eq!(config.pinned_ip.as_deref(), Some("162.159.140.221"));
        assert_eq!(config.payload_bytes, 4096);
        assert_eq!(config.transfer_count, 3);
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_ip_flag_means_dns() {
        let mut cli = bare_cli();
        cli.pinned_ip = Some(String::new());

        let config = load_config(cli).unwrap();
        assert_eq!(config.pinned_ip, None);
    }

    #[test]
    fn test_invalid_ip_rejected() {
        let mut cli = bare_cli();
        cli.pinned_ip = Some("999.999.999.999".to_string());
        assert!(load_config(cli).is_err());
    }

    #[test]
    fn test_conflicting_color_flags_rejected() {
        let mut cli = bare_cli();
        cli.color = true;
        cli.no_color = true;
        assert!(load_config(cli).is_err());
    }

    #[test]
    fn test_config_summary_mentions_pin() {
        let mut config = Config::default();
        config.pinned_ip = Some("1.2.3.4".to_string());
        let summary = display_config_summary(&config);
        assert!(summary.contains("pinned to 1.2.3.4"));
    }
}
