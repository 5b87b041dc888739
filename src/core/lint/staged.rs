//! Map staged files to the commands that should run against them.

use glob_match::glob_match;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedCommand {
    pub pattern: String,
    pub command: String,
    pub file: String,
}

/// Plan one command per configured pattern, run against the first staged
/// file whose basename matches. Patterns with no match are skipped.
pub fn plan_staged<S: AsRef<str>>(
    files: &[S],
    rules: &BTreeMap<String, String>,
) -> Vec<StagedCommand> {
    let files: Vec<&str> = files
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect();

    rules
        .iter()
        .filter(|(_, command)| !command.trim().is_empty())
        .filter_map(|(pattern, command)| {
            files
                .iter()
                .find(|file| glob_match(pattern, basename(file)))
                .map(|file| StagedCommand {
                    pattern: pattern.clone(),
                    command: command.clone(),
                    file: file.to_string(),
                })
        })
        .collect()
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
