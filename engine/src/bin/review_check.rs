//! Command-line checker for review drafts.
//!
//! Reads a draft in the canonical wire shape and prints the validation
//! report for one step or for all five. Exits non-zero when any rule fails,
//! so the checker composes with shell pipelines.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use review_engine::domain::rules;
use review_engine::domain::{BookRecord, Step};
use stepper::LinearStep;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "review-check",
    about = "Validate a book-review draft against the form rules"
)]
struct CliArgs {
    /// Path to a JSON draft in the canonical wire shape.
    #[arg(long)]
    draft: PathBuf,

    /// Validate a single step (1-5) instead of every step.
    #[arg(long)]
    step: Option<u8>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn main() -> io::Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let text = fs::read_to_string(&args.draft)?;
    let record: BookRecord = serde_json::from_str(&text)?;

    let steps: Vec<Step> = match args.step {
        Some(ordinal) => {
            let Some(step) = Step::from_ordinal(ordinal) else {
                return Err(io::Error::other(format!(
                    "step {ordinal} is out of range (1-{})",
                    Step::total()
                )));
            };
            vec![step]
        }
        None => Step::ALL.to_vec(),
    };

    let mut all_valid = true;
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let report = rules::validate_step(&record, step);
        all_valid &= report.is_valid();
        results.push(serde_json::json!({ "step": step.name(), "report": report }));
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Array(results))?
    );

    if all_valid {
        Ok(())
    } else {
        Err(io::Error::other("draft failed validation"))
    }
}
