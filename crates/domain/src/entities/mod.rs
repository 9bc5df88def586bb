//! Domain entities - Records persisted by the store and their read models

mod expert;
mod expert_with_classification;
mod grnti_assignment;
mod grnti_code;
mod region_city;

pub use expert::{Expert, NewExpert};
pub use expert_with_classification::{CreatedExpert, ExpertWithClassification};
pub use grnti_assignment::{ExpertGrntiAssignment, GrntiAssignmentDraft};
pub use grnti_code::GrntiCode;
pub use region_city::RegionCity;
