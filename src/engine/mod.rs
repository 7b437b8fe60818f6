use crate::error::EngineError;
use crate::tree::{DecisionNode, DecisionTree};
use tracing::{debug, error, instrument, warn};

mod session;

pub use session::{HistoryEntry, SessionState};

/// Walks a [`DecisionTree`] one answer at a time.
///
/// The engine holds no session state of its own. Every operation borrows the
/// current [`SessionState`] and either returns the next one or an error, so the
/// caller's session is untouched whenever a transition fails.
pub struct DecisionEngine<'a> {
    tree: &'a DecisionTree,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        Self { tree }
    }

    /// Creates a fresh session positioned at the tree's root.
    #[instrument(level = "trace", skip(self))]
    pub fn start(&self) -> Result<SessionState, EngineError> {
        let root = self.tree.root().ok_or(EngineError::MissingRoot)?;
        self.tree.get_node(root)?;
        debug!(root, "Session started");
        Ok(SessionState::new(root))
    }

    /// Answers the current question with `label` and advances to the node it
    /// points to.
    ///
    /// # Errors
    ///
    /// * `InvalidChoice` if the current node offers no such option. Outcome nodes
    ///   offer none.
    /// * `Cycle` if the option leads to a node already on the current path.
    #[instrument(level = "trace", skip(self, session), fields(node = %session.current_node_id))]
    pub fn choose(&self, session: &SessionState, label: &str) -> Result<SessionState, EngineError> {
        let node = self.current_node(session)?;

        let option = node
            .options()
            .iter()
            .find(|o| o.label == label)
            .ok_or_else(|| {
                warn!(node = %node.id, label, "Rejected unknown option");
                EngineError::InvalidChoice {
                    node_id: node.id.clone(),
                    label: label.to_string(),
                }
            })?;

        if session.is_on_path(&option.next) {
            error!(
                node = %node.id,
                label,
                target = %option.next,
                "Option leads back onto the current path; the tree contains a cycle"
            );
            return Err(EngineError::Cycle {
                node_id: node.id.clone(),
                label: label.to_string(),
                target: option.next.clone(),
            });
        }

        let target = self.tree.get_node(&option.next)?;

        let mut next = session.clone();
        next.history.push(HistoryEntry::new(node.id.clone(), label));
        next.current_node_id = target.id.clone();

        debug!(
            from = %node.id,
            to = %target.id,
            depth = next.history.len(),
            terminal = target.is_outcome(),
            "Advanced"
        );
        Ok(next)
    }

    /// Undoes the most recent answer.
    ///
    /// `go_back(choose(s, l)) == s` for every session `s` and label `l` that
    /// `choose` accepts. Collected field values are kept as they are.
    #[instrument(level = "trace", skip(self, session), fields(node = %session.current_node_id))]
    pub fn go_back(&self, session: &SessionState) -> Result<SessionState, EngineError> {
        let mut previous = session.clone();
        let entry = previous.history.pop().ok_or(EngineError::NoHistory)?;
        debug!(from = %session.current_node_id, to = %entry.node_id, "Went back");
        previous.current_node_id = entry.node_id;
        Ok(previous)
    }

    /// `true` once the session has reached an outcome. A session whose node is
    /// not part of this tree is never terminal.
    pub fn is_terminal(&self, session: &SessionState) -> bool {
        match self.tree.get_node(&session.current_node_id) {
            Ok(node) => node.is_outcome(),
            Err(e) => {
                error!(error = %e, "Session does not belong to this decision tree");
                false
            }
        }
    }

    /// The node to present next. For terminal sessions this is the outcome itself.
    pub fn current_node(&self, session: &SessionState) -> Result<&'a DecisionNode, EngineError> {
        Ok(self.tree.get_node(&session.current_node_id)?)
    }
}
