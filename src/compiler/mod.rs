//! Compile requests against the remote playground backend.

mod client;
mod orchestrator;
mod types;

pub use client::CompilerClient;
pub use orchestrator::Compiler;
pub use types::{CompileOptions, CompileRequest, CompileResult, DEFAULT_TIMEOUT_SECONDS};
