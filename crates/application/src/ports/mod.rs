//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application reaches the store.
//! Adapters in the infrastructure layer implement these ports.

mod expert_store;
mod grnti_store;
mod region_city_store;

pub use expert_store::ExpertStore;
#[cfg(test)]
pub use expert_store::MockExpertStore;
pub use grnti_store::GrntiStore;
#[cfg(test)]
pub use grnti_store::MockGrntiStore;
pub use region_city_store::RegionCityStore;
#[cfg(test)]
pub use region_city_store::MockRegionCityStore;
