use super::view::{FieldView, OutcomeView, PromptView, QuestionView};
use crate::engine::{DecisionEngine, HistoryEntry, SessionState};
use crate::error::{EngineError, FlowError};
use crate::request::{RequestBuilder, RequestPayload};
use crate::trace::TrailFormatter;
use crate::tree::{DecisionTree, NodeKind};
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Clone)]
enum FlowState {
    Idle,
    Active(SessionState),
    /// A configuration fault was hit mid-flow; only a restart recovers.
    Aborted,
}

/// Drives one user's decision flow.
///
/// A controller owns at most one [`SessionState`]. Every mutating operation takes
/// `&mut self`, so overlapping actions against the same session are ruled out at
/// compile time. Serve several users by creating one controller per user; they
/// can share the same tree.
pub struct WorkflowController {
    tree: Arc<DecisionTree>,
    state: FlowState,
}

impl WorkflowController {
    pub fn new(tree: Arc<DecisionTree>) -> Self {
        Self {
            tree,
            state: FlowState::Idle,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// Starts a new flow at the root, discarding any flow in progress.
    #[instrument(level = "trace", skip(self))]
    pub fn start_flow(&mut self) -> Result<(), FlowError> {
        let session = DecisionEngine::new(&self.tree).start().inspect_err(|e| {
            error!(error = %e, "Could not start decision flow");
        })?;
        self.state = FlowState::Active(session);
        Ok(())
    }

    pub fn answer_question(&mut self, label: &str) -> Result<(), FlowError> {
        let next = DecisionEngine::new(&self.tree).choose(self.session()?, label);
        self.commit(next.map_err(FlowError::from))?;

        if let Ok(session) = self.session() {
            if let Ok(node) = self.tree.get_node(session.current_node_id()) {
                if let NodeKind::Outcome(outcome) = &node.kind {
                    info!(
                        action = %outcome.action_type,
                        trail = %TrailFormatter::format_trail(session.history()),
                        "Decision outcome reached"
                    );
                }
            }
        }
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), FlowError> {
        let previous = DecisionEngine::new(&self.tree).go_back(self.session()?);
        self.commit(previous.map_err(FlowError::from))
    }

    pub fn can_go_back(&self) -> bool {
        self.session().is_ok_and(SessionState::can_go_back)
    }

    /// Discards the current flow. [`start_flow`](Self::start_flow) begins a new one.
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FlowState::Active(_))
    }

    /// The answers given so far, root first.
    pub fn trail(&self) -> &[HistoryEntry] {
        match &self.state {
            FlowState::Active(session) => session.history(),
            FlowState::Idle | FlowState::Aborted => &[],
        }
    }

    /// Describes the current step for rendering.
    pub fn current_prompt(&self) -> Result<PromptView, FlowError> {
        let session = self.session()?;
        let node = DecisionEngine::new(&self.tree)
            .current_node(session)
            .map_err(FlowError::from)
            .inspect_err(report)?;

        Ok(match &node.kind {
            NodeKind::Question { prompt, options } => PromptView::Question(QuestionView {
                node_id: node.id.clone(),
                prompt: prompt.clone(),
                options: options.iter().map(|o| o.label.clone()).collect(),
                step: session.history().len() + 1,
                can_go_back: session.can_go_back(),
            }),
            NodeKind::Outcome(outcome) => PromptView::Outcome(OutcomeView {
                node_id: node.id.clone(),
                action_type: outcome.action_type.clone(),
                description: outcome.description.clone(),
                fields: outcome
                    .required_fields
                    .iter()
                    .map(|name| FieldView {
                        name: name.clone(),
                        value: session.answer(name).map(str::to_string),
                        default: outcome.defaults.get(name).cloned(),
                    })
                    .collect(),
                missing: RequestBuilder::new(&self.tree)
                    .missing_fields(session)
                    .map_err(FlowError::from)
                    .inspect_err(report)?,
                can_go_back: session.can_go_back(),
            }),
        })
    }

    pub fn supply_field(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        let next = RequestBuilder::new(&self.tree).supply_field(self.session()?, name, value);
        self.commit(next.map_err(FlowError::from))
    }

    /// `true` iff the flow has reached an outcome whose required fields all resolve.
    pub fn submit_ready(&self) -> bool {
        self.session().is_ok_and(|session| {
            RequestBuilder::new(&self.tree)
                .missing_fields(session)
                .is_ok_and(|missing| missing.is_empty())
        })
    }

    /// Builds the request payload and ends the flow.
    ///
    /// On failure the flow stays where it is, so the caller can supply the
    /// reported fields and try again.
    #[instrument(level = "trace", skip(self))]
    pub fn build_payload(&mut self) -> Result<RequestPayload, FlowError> {
        let payload = RequestBuilder::new(&self.tree)
            .build(self.session()?)
            .map_err(FlowError::from)
            .inspect_err(report)?;
        info!(
            action = payload.action_type(),
            fields = payload.fields().len(),
            trail = %TrailFormatter::format_trail(payload.origin_trail()),
            "Request payload handed off"
        );
        self.state = FlowState::Idle;
        Ok(payload)
    }

    fn session(&self) -> Result<&SessionState, FlowError> {
        match &self.state {
            FlowState::Active(session) => Ok(session),
            FlowState::Idle => Err(FlowError::NoActiveFlow),
            FlowState::Aborted => Err(FlowError::SessionAborted),
        }
    }

    /// Installs the outcome of a transition. Failed transitions keep the previous
    /// session, except cycles, which abort the flow.
    fn commit(&mut self, transition: Result<SessionState, FlowError>) -> Result<(), FlowError> {
        match transition {
            Ok(session) => {
                self.state = FlowState::Active(session);
                Ok(())
            }
            Err(e @ FlowError::Engine(EngineError::Cycle { .. })) => {
                error!(error = %e, "Aborting decision flow");
                self.state = FlowState::Aborted;
                Err(e)
            }
            Err(e) => {
                report(&e);
                Err(e)
            }
        }
    }
}

/// Logs errors the user cannot fix by changing their input.
fn report(e: &FlowError) {
    if !e.is_recoverable() {
        error!(error = %e, "Decision flow hit a configuration fault");
    }
}
