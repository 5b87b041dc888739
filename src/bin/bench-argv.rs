//! Workload binary for external bench harnesses.
//!
//! Reads `FUNISH_BENCH_ITERATIONS` (default 1000), times the split tokenizer
//! on a fixed argument list and prints `{"timings_ns": [...]}` to stdout.

use std::hint::black_box;
use std::process::ExitCode;
use std::time::Instant;

use funish::argv::{parse_argv, ParseOptions, ParserKind};
use funish::bench::DEFAULT_ITERATIONS;

const TOKENS: [&str; 9] = [
    "deploy",
    "--env=production",
    "--replicas",
    "3",
    "--no-dry-run",
    "-v",
    "--tags=service=api,env=prod",
    "app.tar.gz",
    "--timeout=30.5",
];

fn iterations() -> Result<usize, String> {
    match std::env::var("FUNISH_BENCH_ITERATIONS") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!(
                "FUNISH_BENCH_ITERATIONS must be a positive integer, got {:?}",
                raw
            )),
        },
        Err(_) => Ok(DEFAULT_ITERATIONS),
    }
}

fn main() -> ExitCode {
    let iterations = match iterations() {
        Ok(n) => n,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    let options = ParseOptions::default()
        .with_parser(ParserKind::Split)
        .with_alias("v", "verbose");

    let timings_ns: Vec<u64> = (0..iterations)
        .map(|_| {
            let start = Instant::now();
            black_box(parse_argv(black_box(&TOKENS[..]), &options));
            u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
        })
        .collect();

    println!("{}", serde_json::json!({ "timings_ns": timings_ns }));
    ExitCode::SUCCESS
}
