//! Command-line argument tokenizing.
//!
//! Turns a flat list of argument strings into named options and positional
//! arguments. Two interchangeable tokenizers are provided:
//!
//! - [`SplitTokenizer`] - plain substring inspection (default)
//! - [`RegexpTokenizer`] - one regular expression with named groups
//!
//! Both agree on the common forms (`--flag`, `--key=value`, `--key value`,
//! `--no-flag`, `-f`, positionals). They diverge on dash-prefixed tokens
//! whose name falls outside `\w[\w.-]*` (for example `--a+b`): the split
//! tokenizer treats them like any other option and may consume the next
//! token as a value, while the regexp tokenizer records them as bare `true`
//! flags.
//!
//! Parsing is total: any input produces a result, nothing here fails.

mod regexp;
mod split;
mod value;

pub use regexp::RegexpTokenizer;
pub use split::SplitTokenizer;
pub use value::{coerce, ArgValue};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Result of tokenizing an argument list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedArgs {
    pub positional: Vec<String>,
    pub options: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.options.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Truthiness of an option; absent options are `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(ArgValue::is_truthy).unwrap_or(false)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ArgValue::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(ArgValue::as_f64)
    }

    pub(crate) fn set(&mut self, key: &str, value: ArgValue) {
        self.options.insert(key.to_string(), value);
    }

    /// Mirror values between alias and canonical names.
    ///
    /// A value is copied only into a name that is still absent, so applying
    /// the same alias map twice changes nothing.
    pub fn apply_aliases(&mut self, aliases: &BTreeMap<String, String>) {
        for (alias, canonical) in aliases {
            match (self.options.get(canonical), self.options.get(alias)) {
                (Some(value), None) => {
                    let value = value.clone();
                    self.options.insert(alias.clone(), value);
                }
                (None, Some(value)) => {
                    let value = value.clone();
                    self.options.insert(canonical.clone(), value);
                }
                _ => {}
            }
        }
    }

    /// Fill options that are absent or falsy.
    pub fn apply_defaults(&mut self, defaults: &BTreeMap<String, ArgValue>) {
        for (key, default) in defaults {
            let missing = self
                .options
                .get(key)
                .map(|value| !value.is_truthy())
                .unwrap_or(true);
            if missing {
                self.options.insert(key.clone(), default.clone());
            }
        }
    }
}

/// A tokenization strategy.
pub trait Tokenizer {
    fn tokenize(&self, tokens: &[&str]) -> ParsedArgs;
}

/// Which tokenizer `parse_argv` uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    #[default]
    Split,
    Regexp,
}

impl ParserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::Split => "split",
            ParserKind::Regexp => "regexp",
        }
    }

    pub fn tokenizer(&self) -> &'static dyn Tokenizer {
        match self {
            ParserKind::Split => &SplitTokenizer,
            ParserKind::Regexp => &RegexpTokenizer,
        }
    }
}

impl FromStr for ParserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "split" => Ok(ParserKind::Split),
            "regexp" => Ok(ParserKind::Regexp),
            other => Err(Error::validation_invalid_argument(
                "parser",
                format!("Unknown parser '{}'", other),
                None,
                Some(vec!["split".to_string(), "regexp".to_string()]),
            )),
        }
    }
}

/// Alias, default and strategy settings for [`parse_argv`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// alias -> canonical name (e.g. `p -> port`)
    pub alias: BTreeMap<String, String>,
    #[serde(rename = "default")]
    pub defaults: BTreeMap<String, ArgValue>,
    pub parser: ParserKind,
}

impl ParseOptions {
    pub fn with_alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.alias.insert(alias.into(), canonical.into());
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = parser;
        self
    }
}

/// Tokenize `tokens` with the configured strategy, then merge aliases and defaults.
pub fn parse_argv<S: AsRef<str>>(tokens: &[S], options: &ParseOptions) -> ParsedArgs {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    let mut args = options.parser.tokenizer().tokenize(&tokens);
    args.apply_aliases(&options.alias);
    args.apply_defaults(&options.defaults);
    args
}

/// Strip one or two leading dashes. `None` when the token is not dash-prefixed.
pub(crate) fn strip_dashes(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('-')?;
    Some(rest.strip_prefix('-').unwrap_or(rest))
}

/// The token after an option is its value unless it is itself dash-prefixed.
pub(crate) fn value_token<'a>(next: Option<&&'a str>) -> Option<&'a str> {
    next.copied().filter(|token| !token.starts_with('-'))
}
