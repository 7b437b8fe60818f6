use serde::Serialize;

/// What the presentation layer should render for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PromptView {
    Question(QuestionView),
    Outcome(OutcomeView),
}

/// A question awaiting an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub node_id: String,
    pub prompt: String,
    /// Option labels in the order the tree declares them.
    pub options: Vec<String>,
    /// 1-based position of this question on the current path.
    pub step: usize,
    pub can_go_back: bool,
}

/// A reached outcome and the state of its request fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeView {
    pub node_id: String,
    pub action_type: String,
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    /// Required fields that still need a value, in declaration order.
    pub missing: Vec<String>,
    pub can_go_back: bool,
}

/// One required field of an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub value: Option<String>,
    pub default: Option<String>,
}

impl PromptView {
    pub fn is_outcome(&self) -> bool {
        matches!(self, PromptView::Outcome(_))
    }

    pub fn node_id(&self) -> &str {
        match self {
            PromptView::Question(q) => &q.node_id,
            PromptView::Outcome(o) => &o.node_id,
        }
    }
}

impl OutcomeView {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}
