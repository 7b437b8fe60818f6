//! Tests for tree loading, validation and compiled artifacts.
mod common;
use common::*;
use shinsei::prelude::*;

fn outcome(id: &str) -> DecisionNode {
    DecisionNode::outcome(id, Outcome::new("issue", ["commonName"]))
}

#[test]
fn test_load_simple_tree() {
    let tree = create_simple_tree();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root(), Some("root"));
    assert!(tree.contains("nodeA"));
    assert!(tree.get_node("nodeB").unwrap().is_outcome());
}

#[test]
fn test_get_node_not_found() {
    let tree = create_simple_tree();
    assert_eq!(
        tree.get_node("missing").unwrap_err(),
        LookupError::NodeNotFound("missing".to_string())
    );
}

#[test]
fn test_duplicate_node_rejected() {
    let mut definition = create_simple_definition();
    definition.nodes.push(outcome("nodeA"));

    let result = load_tree(definition);
    assert_eq!(result.unwrap_err(), TreeError::DuplicateNode("nodeA".to_string()));
}

#[test]
fn test_dangling_reference_rejected() {
    let mut definition = create_simple_definition();
    definition.nodes[0] = DecisionNode::question(
        "root",
        "Request type?",
        vec![
            AnswerOption::new("New", "nodeA"),
            AnswerOption::new("Revoke", "nowhere"),
        ],
    );

    match load_tree(definition).unwrap_err() {
        TreeError::DanglingReference {
            node_id,
            label,
            target,
        } => {
            assert_eq!(node_id, "root");
            assert_eq!(label, "Revoke");
            assert_eq!(target, "nowhere");
        }
        other => panic!("Expected DanglingReference error, got {:?}", other),
    }
}

#[test]
fn test_unknown_root_rejected() {
    let mut definition = create_simple_definition();
    definition.root = Some("ghost".to_string());
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::RootNotFound("ghost".to_string())
    );
}

#[test]
fn test_missing_root_loads() {
    let mut definition = create_simple_definition();
    definition.root = None;
    let tree = load_tree(definition).expect("a tree without a root still loads");
    assert!(tree.root().is_none());
}

#[test]
fn test_question_without_options_rejected() {
    let definition = TreeDefinition {
        root: Some("q".to_string()),
        nodes: vec![DecisionNode::question("q", "Anything?", vec![])],
    };
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::EmptyOptions("q".to_string())
    );
}

#[test]
fn test_duplicate_label_rejected() {
    let definition = TreeDefinition {
        root: Some("q".to_string()),
        nodes: vec![
            DecisionNode::question(
                "q",
                "Anything?",
                vec![AnswerOption::new("Yes", "a"), AnswerOption::new("Yes", "b")],
            ),
            outcome("a"),
            outcome("b"),
        ],
    };
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::DuplicateLabel {
            node_id: "q".to_string(),
            label: "Yes".to_string(),
        }
    );
}

#[test]
fn test_outcome_without_required_fields_rejected() {
    let definition = TreeDefinition {
        root: None,
        nodes: vec![DecisionNode::outcome(
            "empty",
            Outcome::new("issue", Vec::<String>::new()),
        )],
    };
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::EmptyOutcome("empty".to_string())
    );
}

#[test]
fn test_default_for_unrequired_field_rejected() {
    let definition = TreeDefinition {
        root: None,
        nodes: vec![DecisionNode::outcome(
            "o",
            Outcome::new("issue", ["commonName"]).with_default("caType", "PUBLIC"),
        )],
    };
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::UndeclaredDefault {
            node_id: "o".to_string(),
            field: "caType".to_string(),
        }
    );
}

#[test]
fn test_repeated_required_field_rejected() {
    let definition = TreeDefinition {
        root: None,
        nodes: vec![DecisionNode::outcome(
            "o",
            Outcome::new("issue", ["commonName", "commonName"]),
        )],
    };
    assert!(matches!(
        load_tree(definition).unwrap_err(),
        TreeError::DuplicateField { .. }
    ));
}

#[test]
fn test_blank_action_type_rejected() {
    let definition = TreeDefinition {
        root: None,
        nodes: vec![DecisionNode::outcome("o", Outcome::new("  ", ["commonName"]))],
    };
    assert_eq!(
        load_tree(definition).unwrap_err(),
        TreeError::MissingActionType("o".to_string())
    );
}

#[test]
fn test_shared_nodes_are_allowed() {
    let tree = create_shared_tree();
    let referrers = tree
        .nodes()
        .iter()
        .flat_map(|n| n.options())
        .filter(|o| o.next == "san")
        .count();
    assert_eq!(referrers, 2);
}

#[test]
fn test_compiled_tree_roundtrip() {
    let tree = create_shared_tree();
    let bytes = CompiledTree::new(&tree).to_bytes().expect("Failed to encode");

    let restored = CompiledTree::from_bytes(&bytes)
        .and_then(CompiledTree::into_tree)
        .expect("Failed to decode");

    assert_eq!(restored.root(), tree.root());
    assert_eq!(restored.len(), tree.len());
    let multi = restored.get_node("public_multi").unwrap().as_outcome().unwrap();
    assert_eq!(multi.required_fields, vec!["commonName", "sanEntries", "caType"]);
    assert_eq!(multi.defaults.get("caType").map(String::as_str), Some("PUBLIC"));
    assert!(multi.description.is_some());
}

#[test]
fn test_compiled_tree_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("shinsei-tree-{}.bin", std::process::id()));
    let path = path.to_str().expect("temp path is valid UTF-8");

    let tree = create_simple_tree();
    CompiledTree::new(&tree).save(path).expect("Failed to save");
    let restored = CompiledTree::from_file(path)
        .and_then(CompiledTree::into_tree)
        .expect("Failed to load");
    let _ = std::fs::remove_file(path);

    assert_eq!(restored.root(), Some("root"));
    assert_eq!(restored.len(), 3);
}

#[test]
fn test_compiled_tree_revalidates() {
    let mut definition = create_simple_definition();
    definition.root = Some("ghost".to_string());
    let compiled = CompiledTree {
        version: shinsei::tree::ARTIFACT_VERSION,
        definition,
    };
    let bytes = compiled.to_bytes().unwrap();

    let result = CompiledTree::from_bytes(&bytes).and_then(CompiledTree::into_tree);
    assert!(matches!(
        result,
        Err(ArtifactError::Invalid(TreeError::RootNotFound(_)))
    ));
}

#[test]
fn test_compiled_tree_rejects_garbage() {
    assert!(CompiledTree::from_bytes(&[0xff, 0xff, 0xff]).is_err());
}
