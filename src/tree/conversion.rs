use super::definition::TreeDefinition;
use crate::error::TreeConversionError;

/// A trait for custom configuration models that can be converted into a `TreeDefinition`.
///
/// This is the extension point that keeps the engine format-agnostic. Implement it on
/// the structs your configuration source deserializes into, and the loader can
/// validate and walk your tree.
///
/// # Example
///
/// ```rust,no_run
/// use shinsei::prelude::*;
/// use shinsei::error::TreeConversionError;
///
/// // 1. Define your custom structs for parsing your format.
/// struct YesNoQuestion { id: String, text: String, yes: String, no: String }
/// struct Questionnaire { first: String, questions: Vec<YesNoQuestion> }
///
/// // 2. Implement `IntoTree` for your top-level struct.
/// impl IntoTree for Questionnaire {
///     fn into_tree(self) -> std::result::Result<TreeDefinition, TreeConversionError> {
///         let nodes = self
///             .questions
///             .into_iter()
///             .map(|q| {
///                 DecisionNode::question(
///                     q.id,
///                     q.text,
///                     vec![AnswerOption::new("Yes", q.yes), AnswerOption::new("No", q.no)],
///                 )
///             })
///             .collect();
///
///         Ok(TreeDefinition { root: Some(self.first), nodes })
///     }
/// }
/// ```
pub trait IntoTree {
    /// Consumes the object and converts it into a canonical tree definition.
    fn into_tree(self) -> Result<TreeDefinition, TreeConversionError>;
}

impl IntoTree for TreeDefinition {
    fn into_tree(self) -> Result<TreeDefinition, TreeConversionError> {
        Ok(self)
    }
}
