//! Common test utilities for building decision trees and sessions.
use shinsei::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;

/// The two-outcome tree used throughout the tests.
///
/// `root` asks "Request type?"; "New" leads to the `issue` outcome requiring
/// `commonName`, "Renew" leads to the `renew` outcome requiring `requestId` and
/// `caType` (the latter with a default).
#[allow(dead_code)]
pub fn create_simple_definition() -> TreeDefinition {
    TreeDefinition {
        root: Some("root".to_string()),
        nodes: vec![
            DecisionNode::question(
                "root",
                "Request type?",
                vec![
                    AnswerOption::new("New", "nodeA"),
                    AnswerOption::new("Renew", "nodeB"),
                ],
            ),
            DecisionNode::outcome("nodeA", Outcome::new("issue", ["commonName"])),
            DecisionNode::outcome(
                "nodeB",
                Outcome::new("renew", ["requestId", "caType"]).with_default("caType", "PUBLIC"),
            ),
        ],
    }
}

#[allow(dead_code)]
pub fn create_simple_tree() -> DecisionTree {
    load_tree(create_simple_definition()).expect("simple tree is valid")
}

/// A deeper tree in which two branches share the `san` question.
///
/// ```text
/// root --Public--> exposure --Yes--> san --Single--> public_single
///                           \--No---/    \--Many----> public_multi
///      --Internal--> internal (outcome)
/// ```
#[allow(dead_code)]
pub fn create_shared_tree() -> DecisionTree {
    load_tree(TreeDefinition {
        root: Some("root".to_string()),
        nodes: vec![
            DecisionNode::question(
                "root",
                "Which CA?",
                vec![
                    AnswerOption::new("Public", "exposure"),
                    AnswerOption::new("Internal", "internal"),
                ],
            ),
            DecisionNode::question(
                "exposure",
                "Reachable from the internet?",
                vec![AnswerOption::new("Yes", "san"), AnswerOption::new("No", "san")],
            ),
            DecisionNode::question(
                "san",
                "How many names?",
                vec![
                    AnswerOption::new("Single", "public_single"),
                    AnswerOption::new("Many", "public_multi"),
                ],
            ),
            DecisionNode::outcome(
                "public_single",
                Outcome::new("issue", ["commonName", "caType"]).with_default("caType", "PUBLIC"),
            ),
            DecisionNode::outcome(
                "public_multi",
                Outcome::new("issue", ["commonName", "sanEntries", "caType"])
                    .with_default("caType", "PUBLIC")
                    .with_description("A multi-name certificate will be requested."),
            ),
            DecisionNode::outcome(
                "internal",
                Outcome::new("issue", ["commonName", "caType"]).with_default("caType", "INTERNAL"),
            ),
        ],
    })
    .expect("shared tree is valid")
}

/// A tree whose `loop` option points back at the root. It loads, because cycles
/// are only detected while walking.
#[allow(dead_code)]
pub fn create_cyclic_tree() -> DecisionTree {
    load_tree(TreeDefinition {
        root: Some("start".to_string()),
        nodes: vec![
            DecisionNode::question(
                "start",
                "First?",
                vec![
                    AnswerOption::new("Next", "middle"),
                    AnswerOption::new("Stay", "start"),
                ],
            ),
            DecisionNode::question(
                "middle",
                "Second?",
                vec![
                    AnswerOption::new("Loop", "start"),
                    AnswerOption::new("Done", "end"),
                ],
            ),
            DecisionNode::outcome("end", Outcome::new("issue", ["commonName"])),
        ],
    })
    .expect("cyclic tree passes load-time validation")
}

/// The bundled CA-selection questionnaire.
#[allow(dead_code)]
pub const CA_SELECTION_JSON: &str = include_str!("../data/ca_selection.json");

/// Log output collected by [`capture_logs`].
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber installed and returns its result together with
/// everything it logged, one event per line.
#[allow(dead_code)]
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(LevelFilter::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    (result, output)
}
