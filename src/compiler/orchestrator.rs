use super::client::CompilerClient;
use super::types::{CompileOptions, CompileResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Stateful wrapper around [`CompilerClient`]: tracks whether a compile is
/// in flight and keeps the last result for display.
///
/// `loading` is an advisory signal, not a mutex. Overlapping `compile` calls
/// are possible and the last response to resolve wins; callers that want
/// exclusion should gate on [`Compiler::is_loading`] before triggering.
pub struct Compiler {
    client: CompilerClient,
    loading: AtomicBool,
    result: Mutex<Option<CompileResult>>,
}

impl Compiler {
    pub fn new(client: CompilerClient) -> Self {
        Self {
            client,
            loading: AtomicBool::new(false),
            result: Mutex::new(None),
        }
    }

    /// Run one compile action: raise `loading`, clear the previous result,
    /// and store the new one when the backend answers.
    pub async fn compile(&self, options: CompileOptions) -> CompileResult {
        self.loading.store(true, Ordering::SeqCst);
        *self.result.lock().unwrap() = None;

        let outcome = self.client.compile(options).await;

        *self.result.lock().unwrap() = Some(outcome.clone());
        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Last stored compile outcome, if any.
    pub fn result(&self) -> Option<CompileResult> {
        self.result.lock().unwrap().clone()
    }

    /// Drop the displayed result. Does not touch `loading`.
    pub fn clear_result(&self) {
        *self.result.lock().unwrap() = None;
    }
}
