use super::ErrorCode;

pub fn all_codes() -> &'static [ErrorCode] {
    &[
        ErrorCode::ConfigInvalidJson,
        ErrorCode::ConfigInvalidValue,
        ErrorCode::ValidationInvalidArgument,
        ErrorCode::BenchInvalidConfig,
        ErrorCode::BenchTaskFailed,
        ErrorCode::LintCommitMsgInvalid,
        ErrorCode::InternalIoError,
        ErrorCode::InternalJsonError,
        ErrorCode::InternalUnexpected,
    ]
}

pub fn parse_code(code: &str) -> Option<ErrorCode> {
    all_codes()
        .iter()
        .copied()
        .find(|candidate| candidate.as_str() == code)
}
