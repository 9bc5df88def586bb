//! GRNTI classifier service

use std::sync::Arc;

use domain::{DomainError, GrntiCode, validate_record};
use tracing::{info, instrument};

use crate::{error::ApplicationError, ports::GrntiStore};

const ENTITY: &str = "GRNTI code";

/// Service for maintaining the classifier table
pub struct GrntiService {
    store: Arc<dyn GrntiStore>,
}

impl std::fmt::Debug for GrntiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrntiService").finish_non_exhaustive()
    }
}

impl GrntiService {
    pub fn new(store: Arc<dyn GrntiStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_code(&self, codrub: i32) -> Result<GrntiCode, ApplicationError> {
        self.store
            .get(codrub)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, codrub).into())
    }

    #[instrument(skip(self))]
    pub async fn list_codes(&self) -> Result<Vec<GrntiCode>, ApplicationError> {
        self.store.list_all().await
    }

    #[instrument(skip(self, code), fields(codrub = code.codrub))]
    pub async fn create_code(&self, code: GrntiCode) -> Result<GrntiCode, ApplicationError> {
        validate_record(&code, "GRNTI")?;
        let created = self.store.create(&code).await?;
        info!("GRNTI code created");
        Ok(created)
    }

    #[instrument(skip(self, code), fields(codrub = code.codrub))]
    pub async fn update_code(&self, code: GrntiCode) -> Result<GrntiCode, ApplicationError> {
        validate_record(&code, "GRNTI")?;
        let codrub = code.codrub;
        let updated = self
            .store
            .set(&code)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, codrub))?;
        info!("GRNTI code updated");
        Ok(updated)
    }

    /// Delete a classifier entry
    ///
    /// Fails with a store error while experts still reference the code.
    #[instrument(skip(self))]
    pub async fn delete_code(&self, codrub: i32) -> Result<GrntiCode, ApplicationError> {
        let deleted = self
            .store
            .delete(codrub)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, codrub))?;
        info!("GRNTI code deleted");
        Ok(deleted)
    }
}
