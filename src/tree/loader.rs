use super::conversion::IntoTree;
use super::definition::{AnswerOption, DecisionNode, NodeKind, Outcome, TreeDefinition};
use crate::error::{LookupError, TreeError};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::{debug, instrument, warn};

/// A validated, immutable decision tree.
///
/// Only [`load_tree`] produces one, so every option of every question is known to
/// resolve, the root (if declared) exists and every outcome is well formed.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Option<String>,
    nodes: Vec<DecisionNode>,
    index: AHashMap<String, usize>,
}

impl DecisionTree {
    /// Converts a custom configuration model and validates the result.
    pub fn from_source<T: IntoTree>(source: T) -> Result<Self, TreeError> {
        load_tree(source.into_tree()?)
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Looks up a node by id.
    pub fn get_node(&self, id: &str) -> Result<&DecisionNode, LookupError> {
        self.index
            .get(id)
            .map(|&position| &self.nodes[position])
            .ok_or_else(|| LookupError::NodeNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[DecisionNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns a copy of the definition this tree was loaded from.
    pub fn to_definition(&self) -> TreeDefinition {
        TreeDefinition {
            root: self.root.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

/// Validates a tree definition and indexes its nodes.
///
/// Errors are reported for the first offending node in declaration order.
#[instrument(level = "trace", skip(definition), fields(nodes = definition.nodes.len()))]
pub fn load_tree(definition: TreeDefinition) -> Result<DecisionTree, TreeError> {
    let TreeDefinition { root, nodes } = definition;

    let mut index = AHashMap::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if index.insert(node.id.clone(), position).is_some() {
            return Err(TreeError::DuplicateNode(node.id.clone()));
        }
    }

    for node in &nodes {
        match &node.kind {
            NodeKind::Question { options, .. } => validate_question(node, options, &index)?,
            NodeKind::Outcome(outcome) => validate_outcome(&node.id, outcome)?,
        }
    }

    match &root {
        Some(root_id) if !index.contains_key(root_id) => {
            return Err(TreeError::RootNotFound(root_id.clone()));
        }
        Some(_) => {}
        None => warn!("Decision tree declares no root; flows cannot be started on it"),
    }

    debug!(
        nodes = nodes.len(),
        outcomes = nodes.iter().filter(|n| n.is_outcome()).count(),
        root = ?root,
        "Decision tree loaded"
    );

    Ok(DecisionTree { root, nodes, index })
}

fn validate_question(
    node: &DecisionNode,
    options: &[AnswerOption],
    index: &AHashMap<String, usize>,
) -> Result<(), TreeError> {
    if options.is_empty() {
        return Err(TreeError::EmptyOptions(node.id.clone()));
    }

    if let Some(label) = options.iter().map(|o| &o.label).duplicates().next() {
        return Err(TreeError::DuplicateLabel {
            node_id: node.id.clone(),
            label: label.clone(),
        });
    }

    if let Some(option) = options.iter().find(|o| !index.contains_key(&o.next)) {
        return Err(TreeError::DanglingReference {
            node_id: node.id.clone(),
            label: option.label.clone(),
            target: option.next.clone(),
        });
    }

    Ok(())
}

fn validate_outcome(node_id: &str, outcome: &Outcome) -> Result<(), TreeError> {
    if outcome.action_type.trim().is_empty() {
        return Err(TreeError::MissingActionType(node_id.to_string()));
    }

    if outcome.required_fields.is_empty() {
        return Err(TreeError::EmptyOutcome(node_id.to_string()));
    }

    if let Some(field) = outcome.required_fields.iter().duplicates().next() {
        return Err(TreeError::DuplicateField {
            node_id: node_id.to_string(),
            field: field.clone(),
        });
    }

    if let Some(field) = outcome
        .defaults
        .keys()
        .sorted()
        .find(|field| !outcome.requires(field))
    {
        return Err(TreeError::UndeclaredDefault {
            node_id: node_id.to_string(),
            field: field.clone(),
        });
    }

    Ok(())
}
