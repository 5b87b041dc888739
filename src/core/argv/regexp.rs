//! Tokenizer built on a single regular expression.

use super::{coerce, strip_dashes, value_token, ArgValue, ParsedArgs, Tokenizer};
use regex::Regex;
use std::sync::LazyLock;

static OPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // dashes: `-` or `--`; no: the `no-` negation prefix; value: anything after the first `=`
    Regex::new(r"(?s)^(?P<dashes>--?)(?:(?P<no>no)-)?(?P<name>\w[\w.-]*)(?:=(?P<value>.*))?$")
        .unwrap()
});

/// Matches each token against one pattern with named groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexpTokenizer;

impl Tokenizer for RegexpTokenizer {
    fn tokenize(&self, tokens: &[&str]) -> ParsedArgs {
        let mut args = ParsedArgs::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];

            if let Some(caps) = OPTION_PATTERN.captures(token) {
                let name = caps.name("name").map(|m| m.as_str()).unwrap_or_default();

                if caps.name("no").is_some() {
                    args.set(name, ArgValue::Bool(false));
                } else if let Some(value) = caps.name("value") {
                    args.set(name, coerce(value.as_str()));
                } else if let Some(value) = value_token(tokens.get(i + 1)) {
                    args.set(name, coerce(value));
                    i += 1;
                } else {
                    args.set(name, ArgValue::Bool(true));
                }
            } else {
                match strip_dashes(token) {
                    // Best effort: unmatched option-like tokens become bare flags.
                    Some(name) if !name.is_empty() => args.set(name, ArgValue::Bool(true)),
                    _ => args.positional.push(token.to_string()),
                }
            }

            i += 1;
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_groups() {
        let caps = OPTION_PATTERN.captures("--no-cache").unwrap();
        assert_eq!(&caps["dashes"], "--");
        assert!(caps.name("no").is_some());
        assert_eq!(&caps["name"], "cache");

        let caps = OPTION_PATTERN.captures("-p=8080").unwrap();
        assert_eq!(&caps["dashes"], "-");
        assert_eq!(&caps["name"], "p");
        assert_eq!(&caps["value"], "8080");
    }

    #[test]
    fn names_starting_with_no_are_not_negated() {
        let args = RegexpTokenizer.tokenize(&["--node", "--no"]);
        assert_eq!(args.get("node"), Some(&ArgValue::Bool(true)));
        assert_eq!(args.get("no"), Some(&ArgValue::Bool(true)));
    }

    #[test]
    fn hyphenated_names_match() {
        let args = RegexpTokenizer.tokenize(&["--dry-run", "--out-dir", "dist"]);
        assert_eq!(args.get("dry-run"), Some(&ArgValue::Bool(true)));
        assert_eq!(args.str("out-dir"), Some("dist"));
    }

    #[test]
    fn unmatched_options_become_bare_flags() {
        let args = RegexpTokenizer.tokenize(&["--a+b", "c"]);
        assert_eq!(args.get("a+b"), Some(&ArgValue::Bool(true)));
        assert_eq!(args.positional, vec!["c"]);
    }

    #[test]
    fn empty_inline_value_is_text() {
        let args = RegexpTokenizer.tokenize(&["--name="]);
        assert_eq!(args.str("name"), Some(""));
    }
}
