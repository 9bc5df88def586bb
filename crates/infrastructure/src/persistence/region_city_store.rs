//! SQLite region / city lookup store

use std::sync::Arc;

use application::{ApplicationError, RegionCityStore};
use async_trait::async_trait;
use domain::RegionCity;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, with_connection};

/// SQLite-based place store keyed by city
#[derive(Debug, Clone)]
pub struct SqliteRegionCityStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteRegionCityStore {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionCityStore for SqliteRegionCityStore {
    #[instrument(skip(self))]
    async fn get(&self, city: &str) -> Result<Option<RegionCity>, ApplicationError> {
        let city = city.to_owned();

        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "SELECT region, oblname, city FROM reg_obl_city WHERE city = ?1",
                [&city],
                row_to_place,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<RegionCity>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let mut stmt = conn.prepare(
                "SELECT region, oblname, city FROM reg_obl_city ORDER BY region, oblname, city",
            )?;
            let places: rusqlite::Result<Vec<RegionCity>> =
                stmt.query_map([], row_to_place)?.collect();
            places
        })
        .await
    }

    #[instrument(skip(self, place), fields(city = %place.city))]
    async fn create(&self, place: &RegionCity) -> Result<RegionCity, ApplicationError> {
        let place = place.clone();

        with_connection(&self.pool, move |conn| {
            let created = conn.query_row(
                "INSERT INTO reg_obl_city (region, oblname, city) VALUES (?1, ?2, ?3)
                 RETURNING region, oblname, city",
                params![place.region, place.oblname, place.city],
                row_to_place,
            )?;
            debug!("Inserted place");
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self, place), fields(city = %place.city))]
    async fn set(&self, place: &RegionCity) -> Result<Option<RegionCity>, ApplicationError> {
        let place = place.clone();

        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "UPDATE reg_obl_city SET region = ?1, oblname = ?2 WHERE city = ?3
                 RETURNING region, oblname, city",
                params![place.region, place.oblname, place.city],
                row_to_place,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, city: &str) -> Result<Option<RegionCity>, ApplicationError> {
        let city = city.to_owned();

        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM reg_obl_city WHERE city = ?1 RETURNING region, oblname, city",
                [&city],
                row_to_place,
            )
            .optional()
        })
        .await
    }
}

fn row_to_place(row: &Row<'_>) -> rusqlite::Result<RegionCity> {
    Ok(RegionCity {
        region: row.get(0)?,
        oblname: row.get(1)?,
        city: row.get(2)?,
    })
}
