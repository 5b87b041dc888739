use clap::Args;
use serde::Serialize;

use funish::argv::{coerce, parse_argv, ArgValue, ParseOptions, ParsedArgs, ParserKind};

use super::{parse_key_val, CmdResult};

#[derive(Args)]
pub struct ArgvArgs {
    /// Tokenizer strategy (split, regexp)
    #[arg(long, default_value = "split")]
    parser: String,

    /// Alias mapping as alias=canonical (repeatable)
    #[arg(long, value_name = "ALIAS=NAME", value_parser = parse_key_val)]
    alias: Vec<(String, String)>,

    /// Default value as key=value (repeatable)
    #[arg(long = "default", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    defaults: Vec<(String, String)>,

    /// Tokens to parse (use `--` before tokens that start with a dash)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Serialize)]
pub struct ArgvOutput {
    command: String,
    parser: ParserKind,
    #[serde(flatten)]
    parsed: ParsedArgs,
}

fn default_value(raw: &str) -> ArgValue {
    match raw {
        "true" => ArgValue::Bool(true),
        "false" => ArgValue::Bool(false),
        _ => coerce(raw),
    }
}

pub fn run_json(args: ArgvArgs) -> CmdResult<ArgvOutput> {
    let parser: ParserKind = args.parser.parse()?;

    let mut options = ParseOptions::default().with_parser(parser);
    for (alias, canonical) in args.alias {
        options = options.with_alias(alias, canonical);
    }
    for (key, raw) in &args.defaults {
        options = options.with_default(key.clone(), default_value(raw));
    }

    let parsed = parse_argv(&args.tokens, &options);

    Ok((
        ArgvOutput {
            command: "argv".to_string(),
            parser,
            parsed,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parser: &str, tokens: &[&str]) -> ArgvArgs {
        ArgvArgs {
            parser: parser.to_string(),
            alias: vec![("p".to_string(), "port".to_string())],
            defaults: vec![("host".to_string(), "localhost".to_string())],
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn applies_alias_and_default() {
        let (output, code) = run_json(args("regexp", &["-p=8080", "serve"])).unwrap();
        assert_eq!(code, 0);
        assert_eq!(output.parsed.number("port"), Some(8080.0));
        assert_eq!(output.parsed.str("host"), Some("localhost"));
        assert_eq!(output.parsed.positional, vec!["serve"]);
    }

    #[test]
    fn unknown_parser_is_rejected() {
        let err = run_json(args("getopt", &[])).err().unwrap();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn default_values_are_typed() {
        assert_eq!(default_value("true"), ArgValue::Bool(true));
        assert_eq!(default_value("3000"), ArgValue::Number(3000.0));
        assert_eq!(default_value("dev"), ArgValue::Text("dev".to_string()));
    }
}
