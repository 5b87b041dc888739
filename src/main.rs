use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::{argv, bench, lint, version};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "funish")]
#[command(version = VERSION)]
#[command(about = "Argument parsing, micro-benchmarks, commit linting and version bumping")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Tokenize an argument list and print the parsed record
    Argv(argv::ArgvArgs),
    /// Benchmark the argument tokenizers
    Bench(bench::BenchArgs),
    /// Lint commit messages and plan staged-file commands
    Lint(lint::LintArgs),
    /// Semantic version operations
    Version(version::VersionArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = commands::run_json(cli.command);
    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
