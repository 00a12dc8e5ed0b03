use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timeout budget sent to the backend when the caller does not pick one.
/// Advisory: it bounds the server-side build, not the client-side wait.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

pub const ERROR_RATE_LIMIT: &str = "rate_limit";
pub const ERROR_HTTP: &str = "http_error";
pub const ERROR_NETWORK: &str = "network_error";

/// Everything a caller provides for one compile action.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub circuit: String,
    pub interface: String,
    pub test: String,
    /// Runtime input; when present it is injected into the test file and
    /// also shipped as `input.txt`.
    pub input: Option<String>,
    /// Defaults to `circuit.ml`.
    pub circuit_filename: Option<String>,
    /// Defaults to `circuit.mli`.
    pub interface_filename: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub include_vcd: Option<bool>,
}

/// Wire payload for `POST {api_base}/compile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub files: BTreeMap<String, String>,
    pub timeout_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_vcd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Normalized compile outcome. 2xx bodies deserialize into this verbatim
/// (the server is trusted, no client-side schema validation); transport
/// failures are synthesized through the constructors below so the caller
/// renders every outcome the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform_vcd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_passed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_failed: Option<u32>,
}

impl CompileResult {
    fn failure(error_type: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            waveform: None,
            waveform_vcd: None,
            error_type: Some(error_type.to_string()),
            error_message: Some(message.into()),
            stage: None,
            compile_time_ms: None,
            run_time_ms: None,
            tests_passed: None,
            tests_failed: None,
        }
    }

    pub(crate) fn rate_limited() -> Self {
        Self::failure(
            ERROR_RATE_LIMIT,
            "Too many builds. Please wait a minute before trying again.",
        )
    }

    pub(crate) fn http_error(status: reqwest::StatusCode) -> Self {
        Self::failure(
            ERROR_HTTP,
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        )
    }

    pub(crate) fn network_error(message: impl Into<String>) -> Self {
        Self::failure(ERROR_NETWORK, message)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.error_type.as_deref() == Some(ERROR_RATE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_full_success_body() {
        let raw = r#"{
            "success": true,
            "output": "8 tests passed",
            "waveform": "┌───┐",
            "waveform_vcd": "$version$end",
            "compile_time_ms": 812,
            "run_time_ms": 44,
            "tests_passed": 8,
            "tests_failed": 0
        }"#;
        let result: CompileResult = serde_json::from_str(raw).unwrap();
        assert!(result.success);
        assert_eq!(result.tests_passed, Some(8));
        assert_eq!(result.error_type, None);
    }

    #[test]
    fn server_reported_failures_pass_through() {
        // Stage-specific error kinds are the backend's vocabulary; they must
        // not be reclassified on this side.
        let raw = r#"{
            "success": false,
            "error_type": "compile_error",
            "error_message": "Unbound value foo",
            "stage": "compile"
        }"#;
        let result: CompileResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.error_type.as_deref(), Some("compile_error"));
        assert_eq!(result.stage.as_deref(), Some("compile"));
        assert!(!result.is_rate_limited());
    }

    #[test]
    fn request_omits_unset_options() {
        let request = CompileRequest {
            files: BTreeMap::new(),
            timeout_seconds: 60,
            include_vcd: None,
            session_id: None,
        };
        let raw = serde_json::to_string(&request).unwrap();
        assert!(!raw.contains("include_vcd"));
        assert!(!raw.contains("session_id"));
    }

    #[test]
    fn rate_limit_constructor_matches_wire_shape() {
        let result = CompileResult::rate_limited();
        assert!(result.is_rate_limited());
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .starts_with("Too many builds"));
    }
}
