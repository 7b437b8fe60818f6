//! JSON tree configuration.
//!
//! The on-disk format is deliberately separate from the canonical
//! [`TreeDefinition`]; it is converted through [`IntoTree`] like any other custom
//! format would be.

mod types;

pub use types::*;

use crate::error::{TreeConversionError, TreeError};
use crate::tree::{
    AnswerOption, DecisionNode, DecisionTree, IntoTree, Outcome, TreeDefinition, load_tree,
};
use std::fs;
use tracing::instrument;

impl TreeConfig {
    /// Parses a tree configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        serde_json::from_str(json).map_err(|e| TreeError::JsonParseError(e.to_string()))
    }

    /// Load a tree configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl IntoTree for TreeConfig {
    fn into_tree(self) -> Result<TreeDefinition, TreeConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| {
                if node.id.trim().is_empty() {
                    return Err(TreeConversionError::ValidationError(
                        "node ids must not be empty".to_string(),
                    ));
                }
                Ok(match node.body {
                    NodeBodyConfig::Question { prompt, options } => DecisionNode::question(
                        node.id,
                        prompt,
                        options
                            .into_iter()
                            .map(|o| AnswerOption::new(o.label, o.next))
                            .collect(),
                    ),
                    NodeBodyConfig::Outcome {
                        action_type,
                        required_fields,
                        defaults,
                        description,
                    } => DecisionNode::outcome(
                        node.id,
                        Outcome {
                            action_type,
                            required_fields,
                            defaults: defaults.into_iter().collect(),
                            description,
                        },
                    ),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TreeDefinition {
            root: self.root,
            nodes,
        })
    }
}

/// Parses, converts and validates a JSON tree configuration in one step.
#[instrument(level = "trace", skip(json))]
pub fn load_tree_from_json(json: &str) -> Result<DecisionTree, TreeError> {
    let config = TreeConfig::from_json(json)?;
    load_tree(config.into_tree()?)
}
