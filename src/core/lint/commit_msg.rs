//! Conventional commit message parsing and validation.
//!
//! Format: `type(scope)!: description`, an optional body after a blank line,
//! and optional `token: value` / `token #value` footers inside the body.

use super::config::{CommitMsgConfig, FieldRule};
use super::rules;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static COMMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>[^\n]+)(?:\n\n(?P<body>(?s:.+)))?",
    )
    .unwrap()
});

static FOOTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING CHANGE|[\w-]+)(?::(?: |$)| #)(?P<value>.*)$").unwrap()
});

static BREAKING_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^BREAKING[- ]CHANGE:\s").unwrap());

/// Parsed commit header and body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl CommitMessage {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "type" => Some(self.kind.as_str()),
            "scope" => self.scope.as_deref(),
            "description" => Some(self.description.as_str()),
            "body" => self.body.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub token: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitLintReport {
    /// `None` for merge commits, which are accepted without parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<CommitMessage>,
    pub footers: Vec<Footer>,
    pub breaking: bool,
    pub merge: bool,
}

/// Drop git's `#` comment lines and trailing whitespace.
pub fn clean_message(raw: &str) -> String {
    let kept: Vec<&str> = raw.lines().filter(|line| !line.starts_with('#')).collect();
    kept.join("\n").trim_end().to_string()
}

pub fn parse_commit_message(message: &str) -> Option<CommitMessage> {
    let caps = COMMIT_PATTERN.captures(message)?;
    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    Some(CommitMessage {
        kind: group("type").unwrap_or_default(),
        scope: group("scope"),
        breaking: caps.name("breaking").is_some(),
        description: group("description").unwrap_or_default(),
        body: group("body"),
    })
}

pub fn parse_footers(body: &str) -> Vec<Footer> {
    body.lines()
        .filter_map(|line| FOOTER_PATTERN.captures(line))
        .map(|caps| Footer {
            token: caps["token"].to_string(),
            value: caps["value"].to_string(),
        })
        .collect()
}

/// Validate a commit message against `config`.
pub fn lint_commit_message(raw: &str, config: &CommitMsgConfig) -> Result<CommitLintReport> {
    let message = clean_message(raw);

    let parsed = match parse_commit_message(&message) {
        Some(parsed) => parsed,
        None if message.starts_with("Merge branch") => {
            return Ok(CommitLintReport {
                message: None,
                footers: Vec::new(),
                breaking: false,
                merge: true,
            });
        }
        None => {
            return Err(Error::lint_commit_msg_invalid(
                None,
                "Commit message does not match the conventional commit format",
            )
            .with_hint("Expected `type(scope): description`, e.g. `fix(parser): handle empty input`"));
        }
    };

    for (field, rule) in config.fields() {
        match parsed.field(field) {
            Some(value) if !value.is_empty() => check_field(field, value, rule)?,
            // scope and body are optional
            _ if field == "scope" || field == "body" => continue,
            _ => {
                return Err(Error::lint_commit_msg_invalid(
                    Some(field),
                    format!("Missing {} in commit message", field),
                ))
            }
        }
    }

    let footers = parsed.body.as_deref().map(parse_footers).unwrap_or_default();
    for footer in &footers {
        let is_breaking = footer.token == "BREAKING CHANGE" || footer.token == "BREAKING-CHANGE";
        if is_breaking && footer.value.trim().is_empty() {
            return Err(Error::lint_commit_msg_invalid(
                Some("body"),
                "BREAKING CHANGE footer must have a description",
            ));
        }
    }

    let breaking = parsed.breaking
        || parsed
            .body
            .as_deref()
            .map(|body| BREAKING_FOOTER.is_match(body))
            .unwrap_or(false);

    Ok(CommitLintReport {
        message: Some(parsed),
        footers,
        breaking,
        merge: false,
    })
}

fn check_field(field: &str, value: &str, rule: &FieldRule) -> Result<()> {
    if let Some(pattern) = &rule.pattern {
        let re = Regex::new(pattern).map_err(|e| {
            Error::config_invalid_value(
                format!("lint.commitMsg.{}.pattern", field),
                Some(pattern.clone()),
                e.to_string(),
            )
        })?;
        if !re.is_match(value) {
            return Err(Error::lint_commit_msg_invalid(
                Some(field),
                format!(
                    "Commit message {} does not match the regular expression {}",
                    field, pattern
                ),
            ));
        }
    }

    if !rule.allowed.is_empty() {
        if !rule.allowed.iter().any(|allowed| allowed == value) {
            return Err(Error::lint_commit_msg_invalid(
                Some(field),
                format!(
                    "Commit message {} must be one of: {}",
                    field,
                    rule.allowed.join(", ")
                ),
            ));
        }
        return Ok(());
    }

    if rule.rules.is_empty() {
        if rule.pattern.is_some() {
            return Ok(());
        }
        return Err(Error::config_invalid_value(
            format!("lint.commitMsg.{}", field),
            None,
            "must specify either enum or rules",
        ));
    }

    for name in &rule.rules {
        let re = rules::rule(name).ok_or_else(|| {
            Error::config_invalid_value(
                format!("lint.commitMsg.{}.rules", field),
                Some(name.clone()),
                format!("Unknown rule: {}", name),
            )
            .with_hint(format!("Known rules: {}", rules::rule_names().join(", ")))
        })?;

        if !re.is_match(value) {
            return Err(Error::lint_commit_msg_invalid(
                Some(field),
                format!("Commit message {} does not match the rule {}", field, name),
            ));
        }
    }

    Ok(())
}
