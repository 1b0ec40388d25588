//! One-shot ranking: reads an `/evaluate` request body from a file (or stdin)
//! and prints the ranking.
//!
//! ```text
//! rank request.json
//! cat request.json | rank --strict --json
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use book_decision_companion::api::{EvaluatePayload, EvaluateResponse};
use book_decision_companion::evaluator::{evaluate_request, ScoringPolicy};
use book_decision_companion::EvaluationRequest;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "rank", about = "Rank books by weighted criteria")]
struct Args {
    /// Request JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Require every book to rate exactly the weighted criteria
    #[arg(long, env = "STRICT_CRITERIA")]
    strict: bool,

    /// Print the response JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    book_decision_companion::logging::init_tracing();
    let args = Args::parse();

    let raw = match &args.input {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading stdin")?;
            s
        }
    };

    let payload: EvaluatePayload = serde_json::from_str(&raw).context("parsing request JSON")?;
    let req = EvaluationRequest::from(payload);
    let policy = if args.strict {
        ScoringPolicy::strict()
    } else {
        ScoringPolicy::default()
    };
    let ranked = evaluate_request(&req, policy)?;

    if args.json {
        let out = serde_json::to_string_pretty(&EvaluateResponse {
            ranked_books: ranked,
        })?;
        println!("{out}");
    } else {
        for (i, r) in ranked.iter().enumerate() {
            println!("{:>3}. {:<40} {:>10.2}", i + 1, r.name, r.score);
        }
    }
    Ok(())
}
