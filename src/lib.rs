//! # Shinsei - Guided Decision Engine for Certificate Requests
//!
//! **Shinsei** walks a user through a tree of branching questions and resolves the
//! answers into a terminal outcome: the certificate action to request and the
//! parameters that request needs. The outcome, together with the values the user
//! supplies, becomes a [`RequestPayload`](request::RequestPayload) that is handed to
//! whatever submits certificate requests in your system.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Tree**: Parse a JSON configuration with [`config::load_tree_from_json`],
//!     or convert your own format by implementing [`tree::IntoTree`]. Loading validates
//!     the tree once; afterwards it is immutable and can be shared between sessions.
//! 2.  **Start a Flow**: Create one [`WorkflowController`](workflow::WorkflowController)
//!     per user session.
//! 3.  **Answer Questions**: Render [`current_prompt`](workflow::WorkflowController::current_prompt)
//!     and feed the chosen option labels back with `answer_question`. `back` undoes the
//!     last answer.
//! 4.  **Supply Fields and Build**: Once an outcome is reached, supply its required
//!     fields and call `build_payload`.
//!
//! The lower-level [`DecisionEngine`](engine::DecisionEngine) and
//! [`RequestBuilder`](request::RequestBuilder) are available for callers that want
//! to manage [`SessionState`](engine::SessionState) values themselves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shinsei::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "root": "kind",
//!         "nodes": [
//!             { "id": "kind", "kind": "question", "prompt": "Request type?",
//!               "options": [ { "label": "New", "next": "issue" },
//!                            { "label": "Renew", "next": "renew" } ] },
//!             { "id": "issue", "kind": "outcome", "actionType": "issue",
//!               "requiredFields": ["commonName"] },
//!             { "id": "renew", "kind": "outcome", "actionType": "renew",
//!               "requiredFields": ["requestId"] }
//!         ]
//!     }"#;
//!
//!     let tree = Arc::new(load_tree_from_json(json)?);
//!     let mut flow = WorkflowController::new(tree);
//!
//!     flow.start_flow()?;
//!     flow.answer_question("New")?;
//!     flow.supply_field("commonName", "example.com")?;
//!
//!     let payload = flow.build_payload()?;
//!     println!("{}", payload.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod request;
pub mod trace;
pub mod tree;
pub mod workflow;
