//! Tokenizer built on plain string slicing.

use super::{coerce, strip_dashes, value_token, ArgValue, ParsedArgs, Tokenizer};

/// Inspects each option with `strip_prefix`/`split_once`, no regex.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitTokenizer;

impl Tokenizer for SplitTokenizer {
    fn tokenize(&self, tokens: &[&str]) -> ParsedArgs {
        let mut args = ParsedArgs::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];

            let name = match strip_dashes(token) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    args.positional.push(token.to_string());
                    i += 1;
                    continue;
                }
            };

            if let Some(negated) = name.strip_prefix("no-").filter(|rest| !rest.is_empty()) {
                // `--no-foo=bar` still only negates `foo`
                let key = negated.split_once('=').map_or(negated, |(key, _)| key);
                args.set(key, ArgValue::Bool(false));
            } else if let Some((key, value)) = name.split_once('=').filter(|(key, _)| !key.is_empty()) {
                args.set(key, coerce(value));
            } else if let Some(value) = value_token(tokens.get(i + 1)) {
                args.set(name, coerce(value));
                i += 1;
            } else {
                args.set(name, ArgValue::Bool(true));
            }

            i += 1;
        }

        args
    }
}
