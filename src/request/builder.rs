use super::payload::RequestPayload;
use crate::engine::SessionState;
use crate::error::RequestError;
use crate::tree::{DecisionNode, DecisionTree, Outcome};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Collects outcome fields and turns terminal sessions into request payloads.
pub struct RequestBuilder<'a> {
    tree: &'a DecisionTree,
}

/// Field values after applying answers and defaults.
struct Resolution {
    fields: BTreeMap<String, String>,
    missing: Vec<String>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        Self { tree }
    }

    /// Builds the payload for a terminal session.
    ///
    /// Each required field takes the user's answer if there is one, otherwise the
    /// outcome's default. If any field has neither, every such field is reported
    /// at once, in declaration order.
    #[instrument(level = "trace", skip(self, session), fields(node = %session.current_node_id))]
    pub fn build(&self, session: &SessionState) -> Result<RequestPayload, RequestError> {
        let (_, outcome) = self.outcome_of(session)?;
        let resolution = resolve(outcome, session);

        if !resolution.missing.is_empty() {
            debug!(missing = ?resolution.missing, "Request is incomplete");
            return Err(RequestError::IncompleteFields {
                missing: resolution.missing,
            });
        }

        Ok(RequestPayload::new(
            outcome.action_type.clone(),
            resolution.fields,
            session.history.clone(),
        ))
    }

    /// Records a user-supplied field value. The value's content is not checked.
    #[instrument(
        level = "trace",
        skip(self, session, value),
        fields(node = %session.current_node_id)
    )]
    pub fn supply_field(
        &self,
        session: &SessionState,
        name: &str,
        value: &str,
    ) -> Result<SessionState, RequestError> {
        let (node, outcome) = self.outcome_of(session)?;

        if !outcome.requires(name) {
            warn!(node = %node.id, field = name, "Rejected field the outcome does not require");
            return Err(RequestError::UnknownField {
                node_id: node.id.clone(),
                name: name.to_string(),
            });
        }

        let mut next = session.clone();
        next.answers.insert(name.to_string(), value.to_string());
        debug!(field = name, "Field supplied");
        Ok(next)
    }

    /// Names of the required fields that have neither an answer nor a default.
    pub fn missing_fields(&self, session: &SessionState) -> Result<Vec<String>, RequestError> {
        let (_, outcome) = self.outcome_of(session)?;
        Ok(resolve(outcome, session).missing)
    }

    fn outcome_of(
        &self,
        session: &SessionState,
    ) -> Result<(&'a DecisionNode, &'a Outcome), RequestError> {
        let node = self.tree.get_node(&session.current_node_id)?;
        node.as_outcome()
            .map(|outcome| (node, outcome))
            .ok_or_else(|| RequestError::NotTerminal(node.id.clone()))
    }
}

fn resolve(outcome: &Outcome, session: &SessionState) -> Resolution {
    let mut fields = BTreeMap::new();
    let mut missing = Vec::new();

    for name in &outcome.required_fields {
        match session.answer(name).or_else(|| outcome.defaults.get(name).map(String::as_str)) {
            Some(value) => {
                fields.insert(name.clone(), value.to_string());
            }
            None => missing.push(name.clone()),
        }
    }

    Resolution { fields, missing }
}
