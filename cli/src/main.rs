//! pidigits CLI - command-line front end for the pi digit engine.
//!
//! ```text
//! main() -> init_tracing() -> PiService::from_config() -> subcommand -> stdout
//! ```
//!
//! Logs go to stderr so stdout only ever carries digits or JSON. Ctrl-C cancels
//! a long `digits` request at the next generator refill.

use std::fmt::Write;
use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pidigits_engine::{
    CancellationToken, PiService, SequenceAnalysis, VALIDATION_SEARCH_LIMIT,
    format_with_decimal_point,
};

#[derive(Parser)]
#[command(name = "pidigits")]
#[command(about = "Stream, analyze and search the decimal digits of pi")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print digits [start, start + length); position 0 is the leading 3
    #[command(allow_negative_numbers = true)]
    Digits {
        start: i64,
        length: i64,
        /// Insert the decimal point when the window starts at 0
        #[arg(long)]
        point: bool,
    },
    /// Report repeats, runs and rarity for a digit window
    Analyze {
        sequence: String,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a pi-dentity from a random (or given) seed
    Identity {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Find the first position of a sequence
    Locate {
        sequence: String,
        /// Number of leading digits to search
        #[arg(long, default_value_t = VALIDATION_SEARCH_LIMIT)]
        limit: u64,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let service = PiService::from_config();

    match cli.command {
        Commands::Digits {
            start,
            length,
            point,
        } => {
            let token = CancellationToken::new();
            let on_interrupt = token.clone();
            tokio::spawn(async move {
                if signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let digits = service
                .get_sequence_async(start, length, &token)
                .await
                .with_context(|| format!("failed to produce digits {start}..+{length}"))?;
            if point {
                println!("{}", format_with_decimal_point(start as u64, &digits));
            } else {
                println!("{digits}");
            }
        }
        Commands::Analyze { sequence, json } => {
            let report = service.analyze_sequence(&sequence)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Commands::Identity { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            let identity = service.generate_identity(seed)?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Commands::Locate { sequence, limit } => {
            match service.locate_sequence(&sequence, limit)? {
                Some(position) => println!("{position}"),
                None => {
                    println!("not found in the first {limit} digits");
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn render_report(report: &SequenceAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "rarity: {}", report.rarity);
    let _ = writeln!(
        out,
        "digits: {} ({} distinct)",
        report.length, report.unique_digits
    );
    let _ = writeln!(
        out,
        "significance: {}/10{}",
        report.significance,
        if report.pi_related { " (contains 314)" } else { "" }
    );
    if report.patterns.is_empty() {
        out.push_str("patterns: none\n");
        return out;
    }
    out.push_str("patterns:\n");
    for pattern in &report.patterns {
        let _ = writeln!(
            out,
            "  {:<10} {} at {}",
            pattern.kind.as_str(),
            pattern.value,
            pattern.offset
        );
    }
    out
}
