use super::types::{CompileOptions, CompileRequest, CompileResult, DEFAULT_TIMEOUT_SECONDS};
use crate::inject::inject_input;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const TEST_FILENAME: &str = "test.ml";
const INPUT_FILENAME: &str = "input.txt";
const DEFAULT_CIRCUIT_FILENAME: &str = "circuit.ml";
const DEFAULT_INTERFACE_FILENAME: &str = "circuit.mli";

/// HTTP client for the remote compile service.
///
/// Every transport outcome is folded into a [`CompileResult`]; `compile`
/// never fails with an error the caller has to catch.
pub struct CompilerClient {
    client: Client,
    api_base: String,
    session_id: Option<String>,
}

impl CompilerClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            session_id: None,
        }
    }

    /// Attach the opaque session identifier the backend uses for workspace
    /// caching.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub(crate) fn build_request(&self, options: &CompileOptions) -> CompileRequest {
        let processed_test = match &options.input {
            Some(input) => inject_input(&options.test, input),
            None => options.test.clone(),
        };

        let mut files = BTreeMap::new();
        files.insert(
            options
                .circuit_filename
                .clone()
                .unwrap_or_else(|| DEFAULT_CIRCUIT_FILENAME.to_string()),
            options.circuit.clone(),
        );
        files.insert(
            options
                .interface_filename
                .clone()
                .unwrap_or_else(|| DEFAULT_INTERFACE_FILENAME.to_string()),
            options.interface.clone(),
        );
        files.insert(TEST_FILENAME.to_string(), processed_test);
        if let Some(input) = &options.input {
            files.insert(INPUT_FILENAME.to_string(), input.clone());
        }

        CompileRequest {
            files,
            timeout_seconds: options.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            include_vcd: options.include_vcd,
            session_id: self.session_id.clone(),
        }
    }

    /// Compile and run the given file set on the backend.
    pub async fn compile(&self, options: CompileOptions) -> CompileResult {
        let request = self.build_request(&options);
        let url = format!("{}/compile", self.api_base);
        debug!(%url, files = request.files.len(), "sending compile request");

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "compile request failed to reach the backend");
                return CompileResult::network_error(e.to_string());
            }
        };

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => CompileResult::rate_limited(),
            status if !status.is_success() => CompileResult::http_error(status),
            _ => match response.json::<CompileResult>().await {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "compile response body was unreadable");
                    CompileResult::network_error(e.to_string())
                }
            },
        }
    }
}
