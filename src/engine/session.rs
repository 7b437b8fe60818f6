use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One answered question on the path from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub node_id: String,
    pub label: String,
}

impl HistoryEntry {
    pub fn new(node_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            label: label.into(),
        }
    }
}

/// One user's in-progress traversal of a decision tree.
///
/// Sessions are values: the engine and the request builder never modify a session
/// in place, they return the next one. A failed transition therefore cannot leave
/// a half-applied state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) current_node_id: String,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) answers: BTreeMap<String, String>,
}

impl SessionState {
    pub(crate) fn new(root: &str) -> Self {
        Self {
            current_node_id: root.to_string(),
            history: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    pub fn current_node_id(&self) -> &str {
        &self.current_node_id
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn answer(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Whether `node_id` is the current node or was passed through to get here.
    pub fn is_on_path(&self, node_id: &str) -> bool {
        self.current_node_id == node_id || self.history.iter().any(|e| e.node_id == node_id)
    }
}
