//! GRNTI classifier entry

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A row of the GRNTI classifier
///
/// The code itself is the identity; there is no surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GrntiCode {
    /// Rubric code
    #[validate(range(min = 0, max = 100))]
    pub codrub: i32,
    /// Human-readable description
    #[validate(length(max = 100))]
    pub description: String,
}

impl GrntiCode {
    /// Create a classifier entry
    #[must_use]
    pub fn new(codrub: i32, description: impl Into<String>) -> Self {
        Self {
            codrub,
            description: description.into(),
        }
    }
}
