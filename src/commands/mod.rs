pub type CmdResult<T> = funish::Result<(T, i32)>;

pub mod argv;
pub mod bench;
pub mod lint;
pub mod version;

/// Parse `KEY=value` pairs for repeatable flags.
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (funish::Result<serde_json::Value>, i32) {
    crate::tty::status("funish is working...");

    match command {
        crate::Commands::Argv(args) => dispatch!(args, argv),
        crate::Commands::Bench(args) => dispatch!(args, bench),
        crate::Commands::Lint(args) => dispatch!(args, lint),
        crate::Commands::Version(args) => dispatch!(args, version),
    }
}
