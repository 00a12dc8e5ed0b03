use crate::catalog::Example;
use serde::{Deserialize, Serialize};

/// The fixed set of virtual files an example is made of. No role can be
/// added or removed at runtime; `Input` is an empty string when unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Circuit,
    Interface,
    Test,
    Input,
}

impl FileRole {
    pub const ALL: [FileRole; 4] = [
        FileRole::Circuit,
        FileRole::Interface,
        FileRole::Test,
        FileRole::Input,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::Circuit => "circuit",
            FileRole::Interface => "interface",
            FileRole::Test => "test",
            FileRole::Input => "input",
        }
    }
}

/// Contents of the four editor files. Doubles as the persisted draft record:
/// the JSON encoding of this struct is what lands in storage, and it must
/// round-trip exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFiles {
    pub circuit: String,
    pub interface: String,
    pub test: String,
    #[serde(default)]
    pub input: String,
}

impl DraftFiles {
    pub fn from_example(example: &Example) -> Self {
        Self {
            circuit: example.circuit.clone(),
            interface: example.interface.clone(),
            test: example.test.clone(),
            input: example.input.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, role: FileRole) -> &str {
        match role {
            FileRole::Circuit => &self.circuit,
            FileRole::Interface => &self.interface,
            FileRole::Test => &self.test,
            FileRole::Input => &self.input,
        }
    }

    pub fn set(&mut self, role: FileRole, text: impl Into<String>) {
        let slot = match role {
            FileRole::Circuit => &mut self.circuit,
            FileRole::Interface => &mut self.interface,
            FileRole::Test => &mut self.test,
            FileRole::Input => &mut self.input,
        };
        *slot = text.into();
    }

    pub fn replace_all(&mut self, files: DraftFiles) {
        *self = files;
    }
}
