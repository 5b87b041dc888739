use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use funish::config;
use funish::lint::{lint_commit_message, plan_staged, CommitLintReport, StagedCommand};
use funish::utils::io;

use super::CmdResult;

const DEFAULT_COMMIT_MSG_PATH: &str = ".git/COMMIT_EDITMSG";

#[derive(Args)]
pub struct LintArgs {
    /// Path to funish.json (defaults to ./funish.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: LintCommand,
}

#[derive(Subcommand)]
enum LintCommand {
    /// Validate a commit message file against the conventional commit format
    CommitMsg {
        /// Commit message file
        #[arg(default_value = DEFAULT_COMMIT_MSG_PATH)]
        path: PathBuf,
    },
    /// Plan the configured commands for a set of staged files
    Staged {
        /// Staged file paths
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum LintOutput {
    CommitMsg(CommitMsgOutput),
    Staged(StagedOutput),
}

#[derive(Serialize)]
pub struct CommitMsgOutput {
    command: String,
    path: String,
    #[serde(flatten)]
    report: CommitLintReport,
}

#[derive(Serialize)]
pub struct StagedOutput {
    command: String,
    commands: Vec<StagedCommand>,
}

pub fn run_json(args: LintArgs) -> CmdResult<LintOutput> {
    let settings = config::load(args.config.as_deref())?;

    match args.command {
        LintCommand::CommitMsg { path } => {
            funish::log_status!("lint", "Checking {}", path.display());
            let raw = io::read_file(&path, &format!("read {}", path.display()))?;
            let report = lint_commit_message(&raw, &settings.lint.commit_msg)?;

            Ok((
                LintOutput::CommitMsg(CommitMsgOutput {
                    command: "lint.commit-msg".to_string(),
                    path: path.display().to_string(),
                    report,
                }),
                0,
            ))
        }
        LintCommand::Staged { files } => {
            let commands = plan_staged(&files, &settings.lint.staged);

            Ok((
                LintOutput::Staged(StagedOutput {
                    command: "lint.staged".to_string(),
                    commands,
                }),
                0,
            ))
        }
    }
}
