mod controller;
mod view;

pub use controller::WorkflowController;
pub use view::{FieldView, OutcomeView, PromptView, QuestionView};
