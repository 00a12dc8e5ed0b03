use super::files::{DraftFiles, FileRole};
use crate::catalog::Example;
use crate::storage::StoragePort;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Storage key prefix for persisted drafts; the example key follows it.
pub const DRAFT_KEY_PREFIX: &str = "hardcaml-ide:";

/// How long to wait after the last edit before persisting the draft.
const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

fn draft_key(example_key: &str) -> String {
    format!("{}{}", DRAFT_KEY_PREFIX, example_key)
}

/// Template/draft reconciler for the currently loaded example.
///
/// Holds the pristine template alongside the user's draft, detects changes,
/// and persists edited drafts through the injected [`StoragePort`] so they
/// survive reloads. Exactly one example is active at a time; loading another
/// supersedes the previous draft in memory (its persisted record, if any,
/// stays behind until reset).
///
/// Storage failures never surface to the caller: a failed read means "no
/// persisted draft", a failed write means the save is skipped.
#[derive(Clone)]
pub struct EditorSession {
    inner: Arc<Mutex<SessionState>>,
    storage: Arc<dyn StoragePort>,
    debounce: Duration,
    // Bumped on every edit and reset; a scheduled save only fires if it still
    // holds the latest generation, which coalesces rapid edits into one write.
    save_generation: Arc<AtomicU64>,
}

#[derive(Default)]
struct SessionState {
    active: Option<ActiveExample>,
}

struct ActiveExample {
    key: String,
    template: DraftFiles,
    draft: DraftFiles,
    active_role: FileRole,
    circuit_filename: Option<String>,
    interface_filename: Option<String>,
    has_input: bool,
}

impl EditorSession {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState::default())),
            storage,
            debounce: SAVE_DEBOUNCE,
            save_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Override the save debounce. Intended for tests that drive a paused
    /// clock.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Load an example, merging in a persisted draft for `key` if one exists.
    /// Resets the active file back to the circuit tab.
    pub async fn load_example(&self, key: &str, example: &Example) {
        self.cancel_pending_save();
        let template = DraftFiles::from_example(example);
        let draft = match self.storage.get(&draft_key(key)).await {
            Ok(Some(raw)) => match serde_json::from_str::<DraftFiles>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!(%key, error = %e, "discarding unreadable draft record");
                    template.clone()
                }
            },
            Ok(None) => template.clone(),
            Err(e) => {
                warn!(%key, error = %e, "draft lookup failed, using template");
                template.clone()
            }
        };

        let mut state = self.inner.lock().await;
        state.active = Some(ActiveExample {
            key: key.to_string(),
            template,
            draft,
            active_role: FileRole::Circuit,
            circuit_filename: example.circuit_filename.clone(),
            interface_filename: example.interface_filename.clone(),
            has_input: example.input.is_some(),
        });
    }

    /// Replace the text of one file role and schedule a debounced save.
    pub async fn edit(&self, role: FileRole, text: impl Into<String>) {
        {
            let mut state = self.inner.lock().await;
            let Some(active) = state.active.as_mut() else {
                return;
            };
            active.draft.set(role, text);
        }
        self.schedule_save();
    }

    /// Deep equality between draft and template, recomputed on demand.
    pub async fn has_changes(&self) -> bool {
        let state = self.inner.lock().await;
        state
            .active
            .as_ref()
            .map(|a| a.draft != a.template)
            .unwrap_or(false)
    }

    /// Discard the draft in favor of the template and drop the persisted
    /// record for the current example only.
    pub async fn reset_to_template(&self) {
        self.cancel_pending_save();
        let key = {
            let mut state = self.inner.lock().await;
            let Some(active) = state.active.as_mut() else {
                return;
            };
            active.draft = active.template.clone();
            active.key.clone()
        };
        if let Err(e) = self.storage.remove(&draft_key(&key)).await {
            warn!(%key, error = %e, "failed to delete draft record");
        }
    }

    /// Discard the draft and wipe persisted drafts for every example key,
    /// not just the active one.
    pub async fn reset_all(&self) {
        self.cancel_pending_save();
        {
            let mut state = self.inner.lock().await;
            if let Some(active) = state.active.as_mut() {
                active.draft = active.template.clone();
            }
        }
        let keys = match self.storage.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to enumerate draft records");
                return;
            }
        };
        for key in keys.iter().filter(|k| k.starts_with(DRAFT_KEY_PREFIX)) {
            if let Err(e) = self.storage.remove(key).await {
                warn!(%key, error = %e, "failed to delete draft record");
            }
        }
    }

    pub async fn active_role(&self) -> FileRole {
        let state = self.inner.lock().await;
        state
            .active
            .as_ref()
            .map(|a| a.active_role)
            .unwrap_or(FileRole::Circuit)
    }

    pub async fn set_active_role(&self, role: FileRole) {
        let mut state = self.inner.lock().await;
        if let Some(active) = state.active.as_mut() {
            active.active_role = role;
        }
    }

    /// Text of the file under the active tab.
    pub async fn current_text(&self) -> String {
        let state = self.inner.lock().await;
        state
            .active
            .as_ref()
            .map(|a| a.draft.get(a.active_role).to_string())
            .unwrap_or_default()
    }

    /// Snapshot of all draft file contents.
    pub async fn files(&self) -> DraftFiles {
        let state = self.inner.lock().await;
        state
            .active
            .as_ref()
            .map(|a| a.draft.clone())
            .unwrap_or_default()
    }

    /// Filename overrides carried by the loaded example (circuit, interface).
    pub async fn filenames(&self) -> (Option<String>, Option<String>) {
        let state = self.inner.lock().await;
        state
            .active
            .as_ref()
            .map(|a| (a.circuit_filename.clone(), a.interface_filename.clone()))
            .unwrap_or((None, None))
    }

    /// Whether the loaded example carries runtime input data.
    pub async fn has_input(&self) -> bool {
        let state = self.inner.lock().await;
        state.active.as_ref().map(|a| a.has_input).unwrap_or(false)
    }

    pub async fn example_key(&self) -> Option<String> {
        let state = self.inner.lock().await;
        state.active.as_ref().map(|a| a.key.clone())
    }

    fn cancel_pending_save(&self) {
        self.save_generation.fetch_add(1, Ordering::SeqCst);
    }

    fn schedule_save(&self) {
        let generation = self.save_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        let storage = Arc::clone(&self.storage);
        let latest = Arc::clone(&self.save_generation);
        let delay = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer edit (or a reset) superseded this save.
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            let (key, record) = {
                let state = inner.lock().await;
                let Some(active) = state.active.as_ref() else {
                    return;
                };
                let record = if active.draft != active.template {
                    match serde_json::to_string(&active.draft) {
                        Ok(raw) => Some(raw),
                        Err(e) => {
                            warn!(error = %e, "failed to encode draft record");
                            return;
                        }
                    }
                } else {
                    None
                };
                (draft_key(&active.key), record)
            };
            let outcome = match record {
                Some(raw) => storage.set(&key, &raw).await,
                // Draft equals the template again; no point keeping a record.
                None => storage.remove(&key).await,
            };
            if let Err(e) = outcome {
                warn!(%key, error = %e, "draft save skipped");
            } else {
                debug!(%key, "draft persisted");
            }
        });
    }
}
