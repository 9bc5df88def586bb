//! Expert to GRNTI classification links

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::value_objects::ExpertId;

/// A classification attached to a persisted expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ExpertGrntiAssignment {
    pub expert_id: ExpertId,
    #[validate(range(min = 0, max = 99))]
    pub rubric: i32,
    #[validate(range(min = 0, max = 99))]
    pub subrubric: i32,
    #[validate(range(min = 0, max = 99))]
    pub discipline: i32,
}

/// A classification that is not yet tied to an expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GrntiAssignmentDraft {
    #[validate(range(min = 0, max = 99))]
    pub rubric: i32,
    #[validate(range(min = 0, max = 99))]
    pub subrubric: i32,
    #[validate(range(min = 0, max = 99))]
    pub discipline: i32,
}

impl GrntiAssignmentDraft {
    #[must_use]
    pub const fn new(rubric: i32, subrubric: i32, discipline: i32) -> Self {
        Self {
            rubric,
            subrubric,
            discipline,
        }
    }

    /// Tie the draft to an expert
    #[must_use]
    pub const fn assign_to(self, expert_id: ExpertId) -> ExpertGrntiAssignment {
        ExpertGrntiAssignment {
            expert_id,
            rubric: self.rubric,
            subrubric: self.subrubric,
            discipline: self.discipline,
        }
    }
}
