//! Read models assembled from expert/classification joins

use serde::{Deserialize, Serialize};

use super::{Expert, ExpertGrntiAssignment, GrntiCode};

/// One expert paired with one of its classifications and the classifier
/// entry whose code equals the assignment's rubric
///
/// Only produced by join queries; never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertWithClassification {
    pub expert: Expert,
    pub assignment: ExpertGrntiAssignment,
    pub grnti: GrntiCode,
}

/// Result of creating an expert together with its classifications
///
/// The expert is carried once; every entry of `classifications` refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedExpert {
    pub expert: Expert,
    pub classifications: Vec<ExpertWithClassification>,
}
