use crate::engine::HistoryEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// The structured certificate request handed to the submission collaborator.
///
/// Only [`RequestBuilder::build`](super::RequestBuilder::build) creates payloads,
/// and they cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    action_type: String,
    fields: BTreeMap<String, String>,
    origin_trail: Vec<HistoryEntry>,
}

impl RequestPayload {
    pub(crate) fn new(
        action_type: String,
        fields: BTreeMap<String, String>,
        origin_trail: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            action_type,
            fields,
            origin_trail,
        }
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The answers that led to this request, root first.
    pub fn origin_trail(&self) -> &[HistoryEntry] {
        &self.origin_trail
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
