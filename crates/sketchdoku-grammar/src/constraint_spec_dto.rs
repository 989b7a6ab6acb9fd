use serde::{Deserialize, Serialize};

/// Untyped constraint as received from outside the crate.
///
/// The kind is a plain string and every group is a list of text pieces.
/// [`Compiler::resolve`](crate::Compiler::resolve) turns it into a checked
/// [`ConstraintSpec`](crate::ConstraintSpec).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpecDto {
    /// Kind name.
    pub kind: String,
    /// Group texts, each split into pieces that are joined before parsing.
    #[serde(default)]
    pub groups: Vec<Vec<String>>,
    /// Leading scalars.
    #[serde(default)]
    pub scalars: Vec<u32>,
}
