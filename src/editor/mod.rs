//! Multi-file editor state: templates, drafts, debounced persistence.

mod files;
mod session;

pub use files::{DraftFiles, FileRole};
pub use session::{EditorSession, DRAFT_KEY_PREFIX};
