//! Commit message and staged-file linting.

mod commit_msg;
mod config;
pub mod rules;
mod staged;

pub use commit_msg::{
    clean_message, lint_commit_message, parse_commit_message, parse_footers, CommitLintReport,
    CommitMessage, Footer,
};
pub use config::{CommitMsgConfig, FieldRule, LintConfig, DEFAULT_COMMIT_TYPES};
pub use staged::{plan_staged, StagedCommand};
