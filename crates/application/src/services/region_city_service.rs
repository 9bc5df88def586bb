//! Region / city lookup service

use std::sync::Arc;

use domain::{DomainError, RegionCity, validate_record, validate_region_city};
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, ports::RegionCityStore};

const ENTITY: &str = "Place";

/// Service for the region / oblast / city lookup table
pub struct RegionCityService {
    store: Arc<dyn RegionCityStore>,
}

impl std::fmt::Debug for RegionCityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionCityService").finish_non_exhaustive()
    }
}

impl RegionCityService {
    pub fn new(store: Arc<dyn RegionCityStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_place(&self, city: &str) -> Result<RegionCity, ApplicationError> {
        self.store
            .get(city)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, city).into())
    }

    #[instrument(skip(self))]
    pub async fn list_places(&self) -> Result<Vec<RegionCity>, ApplicationError> {
        self.store.list_all().await
    }

    #[instrument(skip(self, place), fields(city = %place.city))]
    pub async fn create_place(&self, place: RegionCity) -> Result<RegionCity, ApplicationError> {
        check_place(&place)?;
        let created = self.store.create(&place).await?;
        info!("Place created");
        Ok(created)
    }

    #[instrument(skip(self, place), fields(city = %place.city))]
    pub async fn update_place(&self, place: RegionCity) -> Result<RegionCity, ApplicationError> {
        check_place(&place)?;
        let updated = self
            .store
            .set(&place)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, &place.city))?;
        info!("Place updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_place(&self, city: &str) -> Result<RegionCity, ApplicationError> {
        let deleted = self
            .store
            .delete(city)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, city))?;
        info!("Place deleted");
        Ok(deleted)
    }
}

fn check_place(place: &RegionCity) -> Result<(), ApplicationError> {
    validate_record(place, "region/city")?;
    if validate_region_city(place) {
        Ok(())
    } else {
        warn!("Rejected invalid region/city data");
        Err(DomainError::invalid("Invalid region/city data").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockRegionCityStore;

    fn service(store: MockRegionCityStore) -> RegionCityService {
        RegionCityService::new(Arc::new(store))
    }

    fn kazan() -> RegionCity {
        RegionCity::new("Поволжье", "Татарстан", "Казань")
    }

    #[tokio::test]
    async fn create_valid_place() {
        let mut store = MockRegionCityStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|place| Ok(place.clone()));

        let created = service(store).create_place(kazan()).await.unwrap();
        assert_eq!(created, kazan());
    }

    #[tokio::test]
    async fn create_rejects_latin_oblast() {
        let mut store = MockRegionCityStore::new();
        store.expect_create().never();

        let place = RegionCity::new("Поволжье", "Tatarstan", "Казань");
        let err = service(store).create_place(place).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn update_rejects_empty_city() {
        let mut store = MockRegionCityStore::new();
        store.expect_set().never();

        let place = RegionCity::new("Поволжье", "Татарстан", "");
        let err = service(store).update_place(place).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn update_missing_city_is_not_found() {
        let mut store = MockRegionCityStore::new();
        store.expect_set().returning(|_| Ok(None));

        let err = service(store).update_place(kazan()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Place not found: Казань");
    }

    #[tokio::test]
    async fn get_and_delete_by_city() {
        let mut store = MockRegionCityStore::new();
        store.expect_get().returning(|_| Ok(Some(kazan())));
        store.expect_delete().returning(|_| Ok(Some(kazan())));
        let service = service(store);

        assert_eq!(service.get_place("Казань").await.unwrap(), kazan());
        assert_eq!(service.delete_place("Казань").await.unwrap(), kazan());
    }

    #[tokio::test]
    async fn store_failure_on_duplicate_city_propagates() {
        let mut store = MockRegionCityStore::new();
        store.expect_create().returning(|_| {
            Err(ApplicationError::Store(
                "UNIQUE constraint failed: reg_obl_city.city".into(),
            ))
        });

        let err = service(store).create_place(kazan()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Store(_)));
    }
}
