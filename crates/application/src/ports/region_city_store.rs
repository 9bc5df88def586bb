//! Region / city lookup storage port

use async_trait::async_trait;
use domain::RegionCity;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for place persistence, keyed by city name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegionCityStore: Send + Sync {
    /// Get a place by city name
    async fn get(&self, city: &str) -> Result<Option<RegionCity>, ApplicationError>;

    /// List all places ordered by region, oblast and city
    async fn list_all(&self) -> Result<Vec<RegionCity>, ApplicationError>;

    /// Insert a new place
    async fn create(&self, place: &RegionCity) -> Result<RegionCity, ApplicationError>;

    /// Replace region and oblast of the place with this city name
    async fn set(&self, place: &RegionCity) -> Result<Option<RegionCity>, ApplicationError>;

    /// Delete a place, returning its last state
    async fn delete(&self, city: &str) -> Result<Option<RegionCity>, ApplicationError>;
}
