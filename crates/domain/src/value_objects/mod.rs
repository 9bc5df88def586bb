//! Value Objects - Immutable, identity-less domain primitives

mod expert_id;

pub use expert_id::ExpertId;
