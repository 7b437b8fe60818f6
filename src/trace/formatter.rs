use crate::engine::HistoryEntry;
use crate::tree::DecisionTree;
use itertools::Itertools;

/// Formats origin trails into human-readable strings
pub struct TrailFormatter;

impl TrailFormatter {
    /// Compact one-line form, e.g. `purpose=New -> exposure=Yes`. Meant for logs.
    pub fn format_trail(trail: &[HistoryEntry]) -> String {
        if trail.is_empty() {
            return "(root)".to_string();
        }
        trail
            .iter()
            .map(|entry| format!("{}={}", entry.node_id, entry.label))
            .join(" -> ")
    }

    /// One line per answered question, showing the prompt the user saw and the
    /// answer they gave. Meant for the dashboard and audit records.
    ///
    /// Falls back to the node id when the tree no longer has a prompt for it.
    pub fn format_answers(tree: &DecisionTree, trail: &[HistoryEntry]) -> String {
        trail
            .iter()
            .map(|entry| {
                let prompt = tree
                    .get_node(&entry.node_id)
                    .ok()
                    .and_then(|node| node.prompt())
                    .unwrap_or(entry.node_id.as_str());
                format!("{} {}", prompt, entry.label)
            })
            .join("\n")
    }
}
