use itertools::Itertools;
use thiserror::Error;

/// Errors that can occur while loading and validating a decision tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Failed to parse tree configuration JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{0}' is declared more than once")]
    DuplicateNode(String),

    #[error("Option '{label}' of node '{node_id}' points to node '{target}', which does not exist")]
    DanglingReference {
        node_id: String,
        label: String,
        target: String,
    },

    #[error("Declared root node '{0}' does not exist")]
    RootNotFound(String),

    #[error("Question node '{0}' has no options")]
    EmptyOptions(String),

    #[error("Question node '{node_id}' offers the label '{label}' more than once")]
    DuplicateLabel { node_id: String, label: String },

    #[error("Outcome node '{0}' declares no required fields")]
    EmptyOutcome(String),

    #[error("Outcome node '{0}' has no action type")]
    MissingActionType(String),

    #[error("Outcome node '{node_id}' requires the field '{field}' more than once")]
    DuplicateField { node_id: String, field: String },

    #[error("Outcome node '{node_id}' declares a default for '{field}', which it does not require")]
    UndeclaredDefault { node_id: String, field: String },

    #[error(transparent)]
    Conversion(#[from] TreeConversionError),
}

/// Lookup failures against a loaded tree. These always indicate a configuration bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Node '{0}' not found in the decision tree")]
    NodeNotFound(String),
}

/// Errors raised by the decision engine while walking a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("The decision tree declares no root node")]
    MissingRoot,

    #[error("'{label}' is not an option of node '{node_id}'")]
    InvalidChoice { node_id: String, label: String },

    #[error("Cannot go back: the session is already at the root")]
    NoHistory,

    #[error("Option '{label}' of node '{node_id}' leads back to '{target}', which is already on the current path")]
    Cycle {
        node_id: String,
        label: String,
        target: String,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors raised while collecting fields and building a request payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required fields: {}", .missing.iter().join(", "))]
    IncompleteFields { missing: Vec<String> },

    #[error("Field '{name}' is not required by outcome '{node_id}'")]
    UnknownField { node_id: String, name: String },

    #[error("Node '{0}' is not an outcome; fields can only be supplied once the questions are answered")]
    NotTerminal(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors surfaced by the workflow controller to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("No decision flow has been started")]
    NoActiveFlow,

    #[error("The session was aborted after a configuration fault and must be restarted")]
    SessionAborted,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl FlowError {
    /// Returns `true` when the caller can correct the input and try again
    /// without restarting the flow.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FlowError::NoActiveFlow => true,
            FlowError::SessionAborted => false,
            FlowError::Engine(e) => matches!(
                e,
                EngineError::InvalidChoice { .. } | EngineError::NoHistory
            ),
            FlowError::Request(e) => matches!(
                e,
                RequestError::IncompleteFields { .. }
                    | RequestError::UnknownField { .. }
                    | RequestError::NotTerminal(_)
            ),
        }
    }

    /// An actionable message suitable for end users.
    ///
    /// Never contains node identifiers; configuration faults collapse to a
    /// generic message and are meant for operator logs instead.
    pub fn user_message(&self) -> String {
        match self {
            FlowError::NoActiveFlow => "Please start the questionnaire first.".to_string(),
            FlowError::SessionAborted => {
                "This questionnaire could not be completed. Please start over.".to_string()
            }
            FlowError::Engine(EngineError::InvalidChoice { .. }) => {
                "Please select one of the offered options.".to_string()
            }
            FlowError::Engine(EngineError::NoHistory) => {
                "You are already at the first question.".to_string()
            }
            FlowError::Engine(EngineError::Cycle { .. }) => {
                "This questionnaire could not be completed. Please start over.".to_string()
            }
            FlowError::Request(RequestError::IncompleteFields { missing }) => {
                format!("Please provide: {}.", missing.iter().join(", "))
            }
            FlowError::Request(RequestError::UnknownField { name, .. }) => {
                format!("'{}' is not needed for this request.", name)
            }
            FlowError::Request(RequestError::NotTerminal(_)) => {
                "Please answer the remaining questions first.".to_string()
            }
            FlowError::Engine(EngineError::MissingRoot)
            | FlowError::Engine(EngineError::Lookup(_))
            | FlowError::Request(RequestError::Lookup(_)) => {
                "This workflow is misconfigured. Please contact an administrator.".to_string()
            }
        }
    }
}

/// Errors that can occur when saving or loading a compiled tree artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact error: {0}")]
    Generic(String),

    #[error("Compiled tree failed validation: {0}")]
    Invalid(#[from] TreeError),
}

/// Errors that can occur when converting a custom user format into a `TreeDefinition`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
