//! TelBill command-line calculator
//!
//! Reads a call log from a file or stdin and prints the amount to pay.
//! Logs go to stderr so stdout carries only the bill.

mod cli;

use clap::Parser;
use std::io::{self, Write};
use telbill_core::{
    config::{LogFormat, LoggingConfig},
    models::Bill,
    traits::{BillCalculator, CallLogSource},
    AppConfig, BillError, BillResult,
};
use telbill_services::{CallLogFile, CallLogText, TelephoneBillCalculator};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, OutputFormat};

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "telbill={},telbill_core={},telbill_services={}",
            logging.level, logging.level, logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

fn load_config(cli: &Cli) -> BillResult<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn read_stdin() -> BillResult<String> {
    io::read_to_string(io::stdin()).map_err(|e| BillError::LogRead {
        path: "<stdin>".to_string(),
        reason: e.to_string(),
    })
}

fn render(bill: &Bill, format: OutputFormat, breakdown: bool) -> BillResult<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(bill)?);
    }

    if !breakdown {
        return Ok(bill.total.to_string());
    }

    let mut out = String::new();
    for subtotal in &bill.subtotals {
        out.push_str(&format!(
            "{}\t{} calls\t{}\n",
            subtotal.number, subtotal.calls, subtotal.amount
        ));
    }
    if let Some(number) = &bill.waived_number {
        out.push_str(&format!("waived\t{}\t{}\n", number, bill.waived_amount));
    }
    out.push_str(&format!("total\t{}", bill.total));
    Ok(out)
}

fn write_output(out: &mut impl Write, output: &str) -> BillResult<()> {
    writeln!(out, "{}", output)
        .map_err(|e| BillError::Internal(format!("failed to write the bill: {}", e)))
}

fn run(cli: &Cli, config: &AppConfig) -> BillResult<String> {
    let calculator = TelephoneBillCalculator::from_config(config);
    let parser = calculator.parser().clone();

    let records = match cli.log_path() {
        Some(path) => {
            info!("Billing call log {}", path.display());
            CallLogFile::new(path, parser).load_records()?
        }
        None => {
            debug!("Reading call log from stdin");
            let text = read_stdin()?;
            CallLogText::new(&text, parser).load_records()?
        }
    };

    let bill = calculator.calculate_bill(&records);
    render(&bill, cli.format, cli.breakdown)
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            // Logging is configured from the config, so it isn't up yet
            eprintln!("telbill: {}", err);
            std::process::exit(err.exit_code());
        }
    };

    init_tracing(&config.logging);

    let result = run(&cli, &config)
        .and_then(|output| write_output(&mut io::stdout().lock(), &output));

    if let Err(err) = result {
        if err.is_data_error() {
            warn!(code = err.error_code(), "Rejected call log: {}", err);
        } else {
            error!(code = err.error_code(), "{}", err);
        }
        eprintln!("telbill: {}", err);
        std::process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telbill_core::models::{NumberSubtotal, PhoneNumber};

    fn bill() -> Bill {
        let number: PhoneNumber = "420776".parse().unwrap();
        Bill {
            total: "9.5".parse().unwrap(),
            waived_number: Some(number.clone()),
            waived_amount: "6.0".parse().unwrap(),
            subtotals: vec![
                NumberSubtotal {
                    number: "420774".parse().unwrap(),
                    calls: 2,
                    amount: "1.5".parse().unwrap(),
                },
                NumberSubtotal {
                    number,
                    calls: 0,
                    amount: "0".parse().unwrap(),
                },
            ],
        }
    }

    #[test]
    fn test_render_total_only() {
        assert_eq!(render(&bill(), OutputFormat::Text, false).unwrap(), "9.5");
    }

    #[test]
    fn test_render_breakdown() {
        let out = render(&bill(), OutputFormat::Text, true).unwrap();
        assert_eq!(
            out,
            "420774\t2 calls\t1.5\n420776\t0 calls\t0\nwaived\t420776\t6.0\ntotal\t9.5"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_output() {
        let mut out = Vec::new();
        write_output(&mut out, "9.5").unwrap();
        assert_eq!(out, b"9.5\n");

        let err = write_output(&mut ClosedPipe, "9.5").unwrap_err();
        assert!(matches!(err, BillError::Internal(_)));
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_render_json() {
        let out = render(&bill(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], "9.5");
        assert_eq!(value["waived_number"], "420776");
    }
}
