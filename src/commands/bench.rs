use clap::Args;
use serde::Serialize;
use std::hint::black_box;
use std::path::PathBuf;

use funish::argv::{parse_argv, ParseOptions, ParserKind};
use funish::bench::{Bench, TaskResult, TimeUnit};
use funish::config;

use super::CmdResult;

/// Representative argument list exercising flags, negation, inline values and
/// a separate value token.
pub const SAMPLE_TOKENS: [&str; 7] = [
    "cmd", "-b", "--bool", "--no-meep", "--multi=baz", "--foo", "bar",
];

#[derive(Args)]
pub struct BenchArgs {
    /// Path to funish.json (defaults to ./funish.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runner options: --iterations N, --unit s|ms|µs|ns, --table
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
}

#[derive(Serialize)]
pub struct BenchOutput {
    command: String,
    iterations: usize,
    unit: TimeUnit,
    results: Vec<TaskResult>,
}

fn option_parser() -> ParseOptions {
    ParseOptions::default()
        .with_alias("n", "iterations")
        .with_alias("u", "unit")
        .with_alias("t", "table")
}

pub fn run_json(args: BenchArgs) -> CmdResult<BenchOutput> {
    let settings = config::load(args.config.as_deref())?;
    let flags = parse_argv(&args.options, &option_parser());
    let options = settings.bench.to_options()?.merge_args(&flags)?;

    let mut bench = Bench::new(options)?;
    for kind in [ParserKind::Split, ParserKind::Regexp] {
        let parse_options = ParseOptions::default().with_parser(kind);
        bench.add(kind.as_str(), || {
            black_box(parse_argv(black_box(&SAMPLE_TOKENS[..]), &parse_options));
        })?;
    }

    if flags.flag("table") {
        bench.print();
    }

    Ok((
        BenchOutput {
            command: "bench".to_string(),
            iterations: bench.iterations(),
            unit: bench.unit(),
            results: bench.results(),
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    fn args(config: &NamedTempFile, options: &[&str]) -> BenchArgs {
        BenchArgs {
            config: Some(config.path().to_path_buf()),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn benchmarks_both_tokenizers() {
        let file = config_file(r#"{"bench": {"iterations": 5}}"#);
        let (output, code) = run_json(args(&file, &[])).unwrap();

        assert_eq!(code, 0);
        assert_eq!(output.iterations, 5);
        let names: Vec<&str> = output.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["split", "regexp"]);
        assert!(output.results.iter().all(|r| r.samples.len() == 5));
    }

    #[test]
    fn command_line_overrides_config() {
        let file = config_file(r#"{"bench": {"iterations": 5, "unit": "ns"}}"#);
        let (output, _) = run_json(args(&file, &["--iterations=3", "-u", "ms"])).unwrap();

        assert_eq!(output.iterations, 3);
        assert_eq!(output.unit, TimeUnit::Milliseconds);
    }

    #[test]
    fn invalid_iterations_fail_fast() {
        let file = config_file("{}");
        let err = run_json(args(&file, &["--iterations=-1"])).err().unwrap();
        assert_eq!(err.code.as_str(), "bench.invalid_config");
    }
}
