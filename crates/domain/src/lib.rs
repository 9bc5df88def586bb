//! Domain layer for the expert registry
//!
//! Contains the record types, identity value objects, field validators and
//! domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use validation::{validate_expert, validate_new_expert, validate_record, validate_region_city};
pub use value_objects::*;
