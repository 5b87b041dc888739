use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lint section of funish.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    #[serde(default = "default_commit_msg")]
    pub commit_msg: CommitMsgConfig,

    /// Basename glob -> command
    #[serde(default = "default_staged")]
    pub staged: BTreeMap<String, String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            commit_msg: default_commit_msg(),
            staged: default_staged(),
        }
    }
}

/// Per-field constraints for conventional commit messages.
///
/// Fields left out are not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitMsgConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<FieldRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FieldRule>,
}

impl CommitMsgConfig {
    /// Configured fields in checking order.
    pub fn fields(&self) -> Vec<(&'static str, &FieldRule)> {
        [
            ("type", self.kind.as_ref()),
            ("scope", self.scope.as_ref()),
            ("description", self.description.as_ref()),
            ("body", self.body.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, rule)| rule.map(|r| (name, r)))
        .collect()
    }
}

/// Constraint for one commit field.
///
/// A custom `pattern` is checked first. Then a non-empty `enum` wins over `rules`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldRule {
    pub fn rules(rules: &[&str]) -> Self {
        Self {
            rules: rules.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub const DEFAULT_COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
    "release", "wip",
];

fn default_commit_msg() -> CommitMsgConfig {
    CommitMsgConfig {
        kind: Some(FieldRule {
            allowed: DEFAULT_COMMIT_TYPES.iter().map(|t| t.to_string()).collect(),
            rules: vec!["lowercase".to_string()],
            pattern: None,
        }),
        scope: Some(FieldRule::rules(&["lowercase"])),
        description: Some(FieldRule::rules(&["phrasecase"])),
        body: None,
    }
}

fn default_staged() -> BTreeMap<String, String> {
    [("*.rs".to_string(), "cargo fmt --".to_string())]
        .into_iter()
        .collect()
}
