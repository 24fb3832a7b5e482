//! Command-line interface module

use clap::Parser;

/// Cloudflare Speed Tester - measures upload/download throughput and latency
#[derive(Parser, Debug, Clone)]
#[command(name = "cfspeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pin every connection to this Cloudflare edge IP (port 443) instead of
    /// resolving the hostname
    #[arg(long = "ip", value_name = "ADDR")]
    pub pinned_ip: Option<String>,

    /// Base URL of the measurement service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Payload size per transfer; accepts plain bytes or a K/M suffix
    /// (e.g. "512K", "10M")
    #[arg(short = 'b', long = "bytes", value_parser = parse_size, value_name = "SIZE")]
    pub payload_bytes: Option<u64>,

    /// Number of transfers per measurement pass
    #[arg(short, long, value_parser = parse_count, value_name = "N")]
    pub count: Option<u32>,

    /// Print one diagnostic line per transfer
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print the result record as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }
}

/// Parse a payload size with an optional K/M suffix
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid size: {}", s));
    }

    let (digits, multiplier) = match s.chars().last() {
        Some('k') | Some('K') => (&s[..s.len() - 1], 1024u64),
        Some('m') | Some('M') => (&s[..s.len() - 1], 1024 * 1024),
        _ => (s, 1),
    };

    digits
        .parse::<u64>()
        .map_err(|_| format!("Invalid size: {}", s))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("Size too large: {}", s))
        })
        .and_then(|bytes| {
            if bytes == 0 {
                Err("Size must be greater than 0".to_string())
            } else {
                Ok(bytes)
            }
        })
}

/// Parse a transfer count, bounded to a sane range
fn parse_count(s: &str) -> Result<u32, String> {
    if s.starts_with('+') {
        return Err(format!("Invalid count: {}", s));
    }

    s.parse::<u32>()
        .map_err(|_| format!("Invalid count: {}", s))
        .and_then(|n| {
            if n == 0 {
                Err("Count must be greater than 0".to_string())
            } else if n > 100 {
                Err("Count cannot exceed 100".to_string())
            } else {
                Ok(n)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Default to true on Unix-like systems, false elsewhere
    cfg!(unix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_size_plain_bytes() {
        assert_eq!(parse_size("1000"), Ok(1000));
    }

    #[test]
    fn test_parse_size_suffixes() {
        assert_eq!(parse_size("4K"), Ok(4096));
        assert_eq!(parse_size("4k"), Ok(4096));
        assert_eq!(parse_size("10M"), Ok(10 * 1024 * 1024));
    }

    #[test]
    fn test_parse_size_rejects_zero_and_junk() {
        assert!(parse_size("0").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("+5").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn test_parse_count_bounds() {
        assert_eq!(parse_count("5"), Ok(5));
        assert!(parse_count("0").is_err());
        assert!(parse_count("101").is_err());
        assert!(parse_count("nope").is_err());
    }

    #[test]
    fn test_conflicting_color_flags() {
        let cli = Cli {
            pinned_ip: None,
            base_url: None,
            payload_bytes: None,
            count: None,
            verbose: false,
            debug: false,
            color: true,
            no_color: true,
            json: false,
        };
        assert!(cli.validate().is_err());
    }
}
