//! IDE shell facade: catalog + editor + compiler + session identity.

use crate::catalog::Catalog;
use crate::compiler::{CompileOptions, CompileResult, Compiler, CompilerClient};
use crate::editor::EditorSession;
use crate::session::SessionProvider;
use crate::storage::StoragePort;
use anyhow::{bail, Result};
use std::sync::Arc;

/// Wires the pieces together the way the IDE shell drives them: pick an
/// example, edit its files, run the build, reset drafts.
pub struct Workspace {
    catalog: Catalog,
    editor: EditorSession,
    compiler: Compiler,
}

impl Workspace {
    /// Build a workspace against the given catalog, storage backend, and
    /// compile service base URL. Resolves the session identity up front so
    /// every compile request carries it.
    pub async fn new(
        catalog: Catalog,
        storage: Arc<dyn StoragePort>,
        api_base: impl Into<String>,
    ) -> Self {
        let session_id = SessionProvider::new(Arc::clone(&storage)).session_id().await;
        let client = CompilerClient::new(api_base).with_session_id(session_id);
        Self {
            catalog,
            editor: EditorSession::new(storage),
            compiler: Compiler::new(client),
        }
    }

    /// Load an example by catalog key and drop any result left over from the
    /// previous one.
    pub async fn open(&self, key: &str) -> Result<()> {
        let Some(example) = self.catalog.get(key) else {
            bail!("unknown example key: {key}");
        };
        self.editor.load_example(key, example).await;
        self.compiler.clear_result();
        Ok(())
    }

    /// Compile the current draft, including the runtime input and filename
    /// overrides when the example carries them.
    pub async fn run(&self) -> Result<CompileResult> {
        if self.editor.example_key().await.is_none() {
            bail!("no example loaded");
        }
        let files = self.editor.files().await;
        let (circuit_filename, interface_filename) = self.editor.filenames().await;
        let input = self.editor.has_input().await.then(|| files.input.clone());

        let options = CompileOptions {
            circuit: files.circuit,
            interface: files.interface,
            test: files.test,
            input,
            circuit_filename,
            interface_filename,
            ..Default::default()
        };
        Ok(self.compiler.compile(options).await)
    }

    pub async fn reset(&self) {
        self.editor.reset_to_template().await;
        self.compiler.clear_result();
    }

    pub async fn reset_all(&self) {
        self.editor.reset_all().await;
        self.compiler.clear_result();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn editor(&self) -> &EditorSession {
        &self.editor
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::FileRole;
    use crate::storage::MemoryStore;
    use mockito::Matcher;
    use serde_json::json;

    const CATALOG: &str = r#"
        [counter]
        name = "Counter"
        category = "hardcaml"
        circuit = "let counter = ()"
        interface = "val counter : unit"
        test = "let () = Test.run ()"

        [day1_part1]
        name = "Day 1"
        category = "aoc"
        circuit = "let solve = ()"
        interface = "val solve : unit"
        test = "let data = INPUT_DATA"
        input = "42"
    "#;

    async fn workspace(api_base: String) -> Workspace {
        let catalog = Catalog::from_toml_str(CATALOG).unwrap();
        Workspace::new(catalog, Arc::new(MemoryStore::new()), api_base).await
    }

    #[tokio::test]
    async fn open_rejects_unknown_keys() {
        let ws = workspace("http://localhost".into()).await;
        assert!(ws.open("nonexistent").await.is_err());
        assert!(ws.open("counter").await.is_ok());
    }

    #[tokio::test]
    async fn run_requires_a_loaded_example() {
        let ws = workspace("http://localhost".into()).await;
        assert!(ws.run().await.is_err());
    }

    #[tokio::test]
    async fn run_sends_the_draft_with_input_and_session_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/compile")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({
                    "files": {
                        "circuit.ml": "let solve = tweaked",
                        "test.ml": "let data = 42",
                        "input.txt": "42"
                    }
                })),
                Matcher::Regex(r#""session_id":"[0-9a-f-]{36}""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let ws = workspace(server.url()).await;
        ws.open("day1_part1").await.unwrap();
        ws.editor().edit(FileRole::Circuit, "let solve = tweaked").await;

        let result = ws.run().await.unwrap();
        mock.assert_async().await;
        assert!(result.success);
        assert!(ws.compiler().result().unwrap().success);
    }

    #[tokio::test]
    async fn reset_clears_the_displayed_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/compile")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let ws = workspace(server.url()).await;
        ws.open("counter").await.unwrap();
        ws.editor().edit(FileRole::Circuit, "changed").await;
        ws.run().await.unwrap();
        assert!(ws.compiler().result().is_some());

        ws.reset().await;
        assert!(ws.compiler().result().is_none());
        assert!(!ws.editor().has_changes().await);
    }

    #[tokio::test]
    async fn opening_another_example_supersedes_the_draft() {
        let ws = workspace("http://localhost".into()).await;
        ws.open("counter").await.unwrap();
        ws.editor().edit(FileRole::Circuit, "changed").await;

        ws.open("day1_part1").await.unwrap();
        assert_eq!(ws.editor().files().await.circuit, "let solve = ()");
        assert!(!ws.editor().has_changes().await);
    }
}
