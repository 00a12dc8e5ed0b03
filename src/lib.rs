//! Client-side orchestration core for the Hardcaml playground IDE.
//!
//! Manages multi-file editor drafts with persistence, injects runtime input
//! into test sources, and turns every compile-request outcome into data the
//! UI can render uniformly. The compiler/simulator itself is a remote
//! collaborator behind a `/compile` endpoint.

pub mod catalog;
pub mod compiler;
pub mod editor;
pub mod inject;
pub mod session;
pub mod storage;
pub mod workspace;

pub use catalog::{Catalog, Example};
pub use compiler::{CompileOptions, CompileResult, Compiler, CompilerClient};
pub use editor::{DraftFiles, EditorSession, FileRole};
pub use session::SessionProvider;
pub use storage::{FileStore, MemoryStore, StoragePort};
pub use workspace::Workspace;
