use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a decision tree, ready for validation.
/// This is the target structure for any custom configuration format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeDefinition {
    /// Id of the node every session starts at. A tree without a root can be
    /// loaded, but no flow can be started on it.
    pub root: Option<String>,
    pub nodes: Vec<DecisionNode>,
}

/// One step of the guided workflow: either a question or a terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionNode {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    Question {
        prompt: String,
        options: Vec<AnswerOption>,
    },
    Outcome(Outcome),
}

/// A selectable answer of a question and the node it leads to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub next: String,
}

/// The certificate action a path resolves to, with the parameters it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outcome {
    pub action_type: String,
    /// Field names in the order they should be presented.
    pub required_fields: Vec<String>,
    pub defaults: AHashMap<String, String>,
    /// User-facing recommendation shown alongside the outcome.
    pub description: Option<String>,
}

impl DecisionNode {
    pub fn question(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Question {
                prompt: prompt.into(),
                options,
            },
        }
    }

    pub fn outcome(id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Outcome(outcome),
        }
    }

    pub fn is_outcome(&self) -> bool {
        matches!(self.kind, NodeKind::Outcome(_))
    }

    /// The options offered by this node. Outcomes offer none.
    pub fn options(&self) -> &[AnswerOption] {
        match &self.kind {
            NodeKind::Question { options, .. } => options,
            NodeKind::Outcome(_) => &[],
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Question { prompt, .. } => Some(prompt.as_str()),
            NodeKind::Outcome(_) => None,
        }
    }

    pub fn as_outcome(&self) -> Option<&Outcome> {
        match &self.kind {
            NodeKind::Outcome(outcome) => Some(outcome),
            NodeKind::Question { .. } => None,
        }
    }
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            next: next.into(),
        }
    }
}

impl Outcome {
    pub fn new<I, S>(action_type: impl Into<String>, required_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action_type: action_type.into(),
            required_fields: required_fields.into_iter().map(Into::into).collect(),
            defaults: AHashMap::new(),
            description: None,
        }
    }

    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn requires(&self, field: &str) -> bool {
        self.required_fields.iter().any(|f| f == field)
    }
}
