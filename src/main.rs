//! Cloudflare Speed Tester - Main CLI Application
//!
//! Measures upload/download throughput and latency against Cloudflare's
//! speed test endpoints, with Server-Timing latency correction.

use cf_speedtest::{
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, Result},
    output::{self, OutputFormatterFactory},
    session::SpeedTester,
    PKG_NAME, VERSION,
};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;

    if config.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Configuration loaded successfully:");
        print!("{}", display_config_summary(&config));
        println!();
    }

    let tester = SpeedTester::new(config.clone())?;

    if config.debug {
        println!("Session id: {}", tester.meas_id());
        println!();
    }

    if config.verbose && !config.json {
        println!(
            "Running {} x {} byte transfers per pass against {}...",
            config.transfer_count, config.payload_bytes, config.base_url
        );
    }

    let result = tester.run().await?;

    if config.json {
        println!("{}", output::format_json(&result)?);
    } else {
        let formatter = OutputFormatterFactory::create_formatter(config.enable_color);
        println!("{}", formatter.format_result(&result));
    }

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config { .. } | AppError::Validation { .. } => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - --ip must be a literal IP address (e.g. 162.159.140.221)");
            eprintln!("  - --bytes and --count must be greater than 0");
            eprintln!("  - Base URL must start with http:// or https://");
        }
        AppError::Upload { .. } | AppError::Download { .. } => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - If using --ip, verify the edge node is reachable on port 443");
            eprintln!("  - Try a smaller payload with --bytes");
        }
        AppError::Network { .. } => {
            eprintln!();
            eprintln!("Client troubleshooting:");
            eprintln!("  - Verify TLS roots are available on this system");
            eprintln!("  - Check proxy-related environment variables");
        }
        _ => {}
    }
}
