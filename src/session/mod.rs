//! Stable per-installation session identity.

use crate::storage::StoragePort;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Storage key holding the opaque session identifier.
pub const SESSION_ID_KEY: &str = "hardcaml-session-id";

/// Supplies the opaque identifier the backend uses to associate cached build
/// workspaces with a client. Generated once, persisted, then returned
/// unchanged until the storage is cleared.
pub struct SessionProvider {
    storage: Arc<dyn StoragePort>,
}

impl SessionProvider {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub async fn session_id(&self) -> String {
        match self.storage.get(SESSION_ID_KEY).await {
            Ok(Some(id)) if !id.is_empty() => return id,
            Ok(_) => {}
            Err(e) => warn!(error = %e, "session id lookup failed, generating a fresh one"),
        }

        let id = Uuid::new_v4().to_string();
        // Best effort: an unsaved id still identifies this run.
        if let Err(e) = self.storage.set(SESSION_ID_KEY, &id).await {
            warn!(error = %e, "session id not persisted");
        }
        id
    }
}
