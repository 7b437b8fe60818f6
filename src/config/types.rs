use serde::Deserialize;
use std::collections::BTreeMap;

/// Complete tree configuration as stored on disk
#[derive(Debug, Deserialize)]
pub struct TreeConfig {
    #[serde(default, alias = "rootId", alias = "root_id")]
    pub root: Option<String>,
    pub nodes: Vec<NodeConfig>,
}

/// A configured node with its id and kind-specific body
#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    #[serde(flatten)]
    pub body: NodeBodyConfig,
}

/// Kind-specific node data, selected by the `kind` key
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeBodyConfig {
    Question {
        #[serde(alias = "text")]
        prompt: String,
        options: Vec<OptionConfig>,
    },
    Outcome {
        #[serde(alias = "actionType")]
        action_type: String,
        #[serde(default, alias = "requiredFields")]
        required_fields: Vec<String>,
        #[serde(default)]
        defaults: BTreeMap<String, String>,
        #[serde(default, alias = "message")]
        description: Option<String>,
    },
}

/// One selectable option of a question
#[derive(Debug, Deserialize)]
pub struct OptionConfig {
    pub label: String,
    #[serde(alias = "nextNodeId", alias = "next_node_id")]
    pub next: String,
}
