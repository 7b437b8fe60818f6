//! Tests for field collection and payload building.
mod common;
use common::*;
use shinsei::prelude::*;

fn at_outcome(tree: &DecisionTree, label: &str) -> SessionState {
    let engine = DecisionEngine::new(tree);
    engine.choose(&engine.start().unwrap(), label).unwrap()
}

#[test]
fn test_issue_scenario() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);

    let session = at_outcome(&tree, "New");
    let session = builder.supply_field(&session, "commonName", "example.com").unwrap();
    let payload = builder.build(&session).unwrap();

    assert_eq!(payload.action_type(), "issue");
    assert_eq!(payload.fields().len(), 1);
    assert_eq!(payload.field("commonName"), Some("example.com"));
    assert_eq!(payload.origin_trail(), &[HistoryEntry::new("root", "New")]);
}

#[test]
fn test_missing_common_name_reported() {
    let tree = create_simple_tree();
    let session = at_outcome(&tree, "New");

    assert_eq!(
        RequestBuilder::new(&tree).build(&session).unwrap_err(),
        RequestError::IncompleteFields {
            missing: vec!["commonName".to_string()],
        }
    );
}

#[test]
fn test_all_missing_fields_reported_in_order() {
    let tree = create_shared_tree();
    let engine = DecisionEngine::new(&tree);
    let mut session = engine.start().unwrap();
    for label in ["Public", "Yes", "Many"] {
        session = engine.choose(&session, label).unwrap();
    }

    match RequestBuilder::new(&tree).build(&session).unwrap_err() {
        RequestError::IncompleteFields { missing } => {
            assert_eq!(missing, vec!["commonName", "sanEntries"]);
        }
        other => panic!("Expected IncompleteFields error, got {:?}", other),
    }
}

#[test]
fn test_defaults_fill_unanswered_fields() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let session = at_outcome(&tree, "Renew");
    let session = builder.supply_field(&session, "requestId", "42").unwrap();

    let payload = builder.build(&session).unwrap();
    assert_eq!(payload.action_type(), "renew");
    assert_eq!(payload.field("requestId"), Some("42"));
    assert_eq!(payload.field("caType"), Some("PUBLIC"));
}

#[test]
fn test_answers_override_defaults() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let mut session = at_outcome(&tree, "Renew");
    session = builder.supply_field(&session, "requestId", "42").unwrap();
    session = builder.supply_field(&session, "caType", "INTERNAL").unwrap();

    let payload = builder.build(&session).unwrap();
    assert_eq!(payload.field("caType"), Some("INTERNAL"));
}

#[test]
fn test_unknown_field_rejected() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let session = at_outcome(&tree, "New");

    assert_eq!(
        builder.supply_field(&session, "requestId", "42").unwrap_err(),
        RequestError::UnknownField {
            node_id: "nodeA".to_string(),
            name: "requestId".to_string(),
        }
    );
}

#[test]
fn test_fields_only_at_outcomes() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let session = DecisionEngine::new(&tree).start().unwrap();

    assert_eq!(
        builder.supply_field(&session, "commonName", "example.com").unwrap_err(),
        RequestError::NotTerminal("root".to_string())
    );
    assert_eq!(
        builder.build(&session).unwrap_err(),
        RequestError::NotTerminal("root".to_string())
    );
}

#[test]
fn test_stale_answers_never_leak_into_payload() {
    let tree = create_simple_tree();
    let engine = DecisionEngine::new(&tree);
    let builder = RequestBuilder::new(&tree);

    // Fill the "Renew" outcome, go back, and take the "New" branch instead.
    let renew = at_outcome(&tree, "Renew");
    let renew = builder.supply_field(&renew, "requestId", "42").unwrap();
    let root = engine.go_back(&renew).unwrap();
    let issue = engine.choose(&root, "New").unwrap();
    let issue = builder.supply_field(&issue, "commonName", "example.com").unwrap();

    let payload = builder.build(&issue).unwrap();
    assert_eq!(payload.fields().keys().collect::<Vec<_>>(), vec!["commonName"]);
}

#[test]
fn test_missing_fields_matches_build() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let session = at_outcome(&tree, "Renew");

    assert_eq!(builder.missing_fields(&session).unwrap(), vec!["requestId"]);
    let session = builder.supply_field(&session, "requestId", "7").unwrap();
    assert!(builder.missing_fields(&session).unwrap().is_empty());
}

#[test]
fn test_payload_json_shape() {
    let tree = create_simple_tree();
    let builder = RequestBuilder::new(&tree);
    let session = builder
        .supply_field(&at_outcome(&tree, "New"), "commonName", "example.com")
        .unwrap();
    let payload = builder.build(&session).unwrap();

    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(json["actionType"], "issue");
    assert_eq!(json["fields"]["commonName"], "example.com");
    assert_eq!(json["originTrail"][0]["nodeId"], "root");
    assert_eq!(json["originTrail"][0]["label"], "New");
}
