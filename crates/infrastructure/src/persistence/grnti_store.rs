//! SQLite GRNTI classifier store

use std::sync::Arc;

use application::{ApplicationError, GrntiStore};
use async_trait::async_trait;
use domain::GrntiCode;
use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, with_connection};

/// SQLite-based classifier store
#[derive(Debug, Clone)]
pub struct SqliteGrntiStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteGrntiStore {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrntiStore for SqliteGrntiStore {
    #[instrument(skip(self))]
    async fn get(&self, codrub: i32) -> Result<Option<GrntiCode>, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "SELECT codrub, description FROM grnti_classifier WHERE codrub = ?1",
                [codrub],
                row_to_code,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<GrntiCode>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let mut stmt =
                conn.prepare("SELECT codrub, description FROM grnti_classifier ORDER BY codrub")?;
            let codes: rusqlite::Result<Vec<GrntiCode>> = stmt.query_map([], row_to_code)?.collect();
            codes
        })
        .await
    }

    #[instrument(skip(self, code), fields(codrub = code.codrub))]
    async fn create(&self, code: &GrntiCode) -> Result<GrntiCode, ApplicationError> {
        let code = code.clone();

        with_connection(&self.pool, move |conn| {
            let created = conn.query_row(
                "INSERT INTO grnti_classifier (codrub, description) VALUES (?1, ?2)
                 RETURNING codrub, description",
                params![code.codrub, code.description],
                row_to_code,
            )?;
            debug!("Inserted classifier entry");
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self, code), fields(codrub = code.codrub))]
    async fn set(&self, code: &GrntiCode) -> Result<Option<GrntiCode>, ApplicationError> {
        let code = code.clone();

        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "UPDATE grnti_classifier SET description = ?1 WHERE codrub = ?2
                 RETURNING codrub, description",
                params![code.description, code.codrub],
                row_to_code,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, codrub: i32) -> Result<Option<GrntiCode>, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                "DELETE FROM grnti_classifier WHERE codrub = ?1 RETURNING codrub, description",
                [codrub],
                row_to_code,
            )
            .optional()
        })
        .await
    }
}

fn row_to_code(row: &Row<'_>) -> rusqlite::Result<GrntiCode> {
    Ok(GrntiCode {
        codrub: row.get(0)?,
        description: row.get(1)?,
    })
}
