//! CLI command implementations.

pub mod check;
pub mod poll;
pub mod show_config;

use anyhow::Result;
use assurance_qc_client::{QuickConnectResult, StatusPayload};
use serde_json::{json, Value};
use std::process::ExitCode;

/// JSON view of a classified result.
pub fn render(result: &QuickConnectResult<StatusPayload>) -> Value {
    match result {
        Ok(payload) => json!({
            "result": "success",
            "statusCode": payload.status_code,
            "body": payload
                .json::<Value>()
                .unwrap_or_else(|_| Value::String(payload.body_text().into_owned())),
        }),
        Err(error) => json!({
            "result": "failure",
            "error": error.code(),
            "message": error.to_string(),
        }),
    }
}

/// Print `result` to stdout as pretty JSON.
pub fn print_result(result: &QuickConnectResult<StatusPayload>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&render(result))?);
    Ok(())
}

/// Success exits 0, any failure exits 1.
pub fn exit_code(result: &QuickConnectResult<StatusPayload>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
