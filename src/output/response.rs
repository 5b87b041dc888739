//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use funish::error::Hint;
use funish::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub(crate) fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::BenchInvalidConfig
        | ErrorCode::LintCommitMsgInvalid => 2,

        ErrorCode::BenchTaskFailed => 3,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(exit_code_for_error(ErrorCode::BenchInvalidConfig), 2);
        assert_eq!(exit_code_for_error(ErrorCode::LintCommitMsgInvalid), 2);
        assert_eq!(exit_code_for_error(ErrorCode::BenchTaskFailed), 3);
        assert_eq!(exit_code_for_error(ErrorCode::InternalIoError), 1);
    }

    #[test]
    fn error_envelope_omits_data() {
        let err = Error::bench_task_failed("split", 4, "boom").with_hint("check the task body");
        let json = serde_json::to_value(CliResponse::<()>::from_error(&err)).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "bench.task_failed");
        assert_eq!(json["error"]["details"]["task"], "split");
        assert_eq!(json["error"]["hints"][0]["message"], "check the task body");
    }

    #[test]
    fn mapped_error_keeps_exit_code() {
        let result: Result<(serde_json::Value, i32)> =
            Err(Error::lint_commit_msg_invalid(Some("type"), "bad type"));
        let (json, code) = map_cmd_result_to_json(result);
        assert!(json.is_err());
        assert_eq!(code, 2);
    }

    #[test]
    fn success_envelope_wraps_data() {
        let json = serde_json::to_value(CliResponse::success(serde_json::json!({"to": "1.0.1"})))
            .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["to"], "1.0.1");
        assert!(json.get("error").is_none());
    }
}
