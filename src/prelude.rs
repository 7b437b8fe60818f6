//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the shinsei crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use shinsei::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> Result<()> {
//! let config = TreeConfig::from_file("data/ca_selection.json")?;
//! let tree = Arc::new(DecisionTree::from_source(config)?);
//!
//! let mut flow = WorkflowController::new(tree);
//! flow.start_flow()?;
//! if let PromptView::Question(question) = flow.current_prompt()? {
//!     println!("{} {:?}", question.prompt, question.options);
//! }
//! # Ok(())
//! # }
//! ```

// Tree model and loading
pub use crate::config::{TreeConfig, load_tree_from_json};
pub use crate::tree::{
    AnswerOption, CompiledTree, DecisionNode, DecisionTree, IntoTree, NodeKind, Outcome,
    TreeDefinition, load_tree,
};

// Traversal and request building
pub use crate::engine::{DecisionEngine, HistoryEntry, SessionState};
pub use crate::request::{RequestBuilder, RequestPayload};
pub use crate::workflow::{FieldView, OutcomeView, PromptView, QuestionView, WorkflowController};

// Error types
pub use crate::error::{
    ArtifactError, EngineError, FlowError, LookupError, RequestError, TreeConversionError,
    TreeError,
};

// Trail formatting
pub use crate::trace::TrailFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
