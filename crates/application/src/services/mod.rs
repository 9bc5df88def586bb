//! Application services - Use case implementations

mod expert_service;
mod grnti_service;
mod region_city_service;

pub use expert_service::{ExpertInput, ExpertService};
pub use grnti_service::GrntiService;
pub use region_city_service::RegionCityService;
