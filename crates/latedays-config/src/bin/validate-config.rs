//! Config validation CLI tool
//!
//! Validates a latedays configuration file and reports any errors.

use latedays_util::format_deadline;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: validate-config <config-file>");
            eprintln!();
            eprintln!("Validates a latedays configuration file.");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!(
            "Error: Configuration file not found: {}",
            config_path.display()
        );
        return ExitCode::from(1);
    }

    match latedays_config::load_config(&config_path) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!(
                "  Config version: {}",
                latedays_config::CURRENT_CONFIG_VERSION
            );
            println!("  Timezone: {}", config.timezone);
            println!("  Max late days: {}", config.caps.max_late_days);
            println!(
                "  Request/refund periods: {} / {} days",
                config.caps.request_period_in_days, config.caps.refund_period_in_days
            );

            if !config.deadlines.is_empty() {
                println!();
                println!("Assignments:");
                for (id, deadline) in &config.deadlines {
                    println!("  - {}: due {}", id, format_deadline(deadline));
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                latedays_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                latedays_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                latedays_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                latedays_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        latedays_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
