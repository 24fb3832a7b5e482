//! Result rendering: plain, colored and JSON output, plus the verbose
//! per-transfer diagnostic lines.

use crate::error::Result;
use crate::models::{PassStats, SpeedTestResult, TransferSample};
use colored::Colorize;

/// Formats a completed speed test result for the terminal
pub trait ResultFormatter {
    fn format_result(&self, result: &SpeedTestResult) -> String;
}

/// Plain-text formatter, no ANSI escapes
pub struct PlainFormatter;

impl ResultFormatter for PlainFormatter {
    fn format_result(&self, result: &SpeedTestResult) -> String {
        format!(
            "Average Upload Speed:     {}\n\
             Average Download Speed:   {}\n\
             Average Upload Latency:   {}\n\
             Average Download Latency: {}",
            format_speed(result.avg_upload_speed_mbps),
            format_speed(result.avg_download_speed_mbps),
            format_latency(&result.upload()),
            format_latency(&result.download()),
        )
    }
}

/// Colored formatter for interactive terminals
pub struct ColoredFormatter;

impl ResultFormatter for ColoredFormatter {
    fn format_result(&self, result: &SpeedTestResult) -> String {
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}",
            "Average Upload Speed:    ".bold(),
            format_speed(result.avg_upload_speed_mbps).green(),
            "Average Download Speed:  ".bold(),
            format_speed(result.avg_download_speed_mbps).green(),
            "Average Upload Latency:  ".bold(),
            format_latency(&result.upload()).cyan(),
            "Average Download Latency:".bold(),
            format_latency(&result.download()).cyan(),
        )
    }
}

/// Picks a formatter based on the color configuration
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    pub fn create_formatter(enable_color: bool) -> Box<dyn ResultFormatter> {
        if enable_color {
            Box::new(ColoredFormatter)
        } else {
            Box::new(PlainFormatter)
        }
    }
}

/// Render the result record as pretty-printed JSON
pub fn format_json(result: &SpeedTestResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Verbose per-transfer line: direction, payload size, raw elapsed time and
/// server-reported time. Diagnostic side effect only; never feeds back into
/// the computed figures.
pub fn report_transfer(direction: &str, payload_bytes: u64, sample: &TransferSample) {
    println!(
        "{} {} bytes in {:.1?} (server time: {:.1?})",
        direction, payload_bytes, sample.wall_time, sample.server_time
    );
}

fn format_speed(mbps: f64) -> String {
    format!("{:.2} Mb/s", mbps)
}

fn format_latency(stats: &PassStats) -> String {
    format!("{:.1}ms", stats.latency_ms())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_result() -> SpeedTestResult {
        SpeedTestResult::new(
            PassStats {
                speed_mbps: 12.25,
                avg_latency: Duration::from_millis(40),
            },
            PassStats {
                speed_mbps: 98.7,
                avg_latency: Duration::from_micros(25_500),
            },
            42,
        )
    }

    #[test]
    fn test_plain_formatter_contains_all_four_figures() {
        let output = PlainFormatter.format_result(&sample_result());

        assert!(output.contains("12.25 Mb/s"));
        assert!(output.contains("98.70 Mb/s"));
        assert!(output.contains("40.0ms"));
        assert!(output.contains("25.5ms"));
    }

    #[test]
    fn test_plain_formatter_has_no_ansi_escapes() {
        let output = PlainFormatter.format_result(&sample_result());
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_factory_picks_plain_without_color() {
        let formatter = OutputFormatterFactory::create_formatter(false);
        let output = formatter.format_result(&sample_result());
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_json_output_round_trips() {
        let result = sample_result();
        let json = format_json(&result).unwrap();
        let parsed: SpeedTestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
