//! GRNTI classifier storage port

use async_trait::async_trait;
use domain::GrntiCode;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for classifier persistence, keyed by `codrub`
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GrntiStore: Send + Sync {
    /// Get a classifier entry by code
    async fn get(&self, codrub: i32) -> Result<Option<GrntiCode>, ApplicationError>;

    /// List all entries ordered by code
    async fn list_all(&self) -> Result<Vec<GrntiCode>, ApplicationError>;

    /// Insert a new entry
    async fn create(&self, code: &GrntiCode) -> Result<GrntiCode, ApplicationError>;

    /// Replace the description of an existing entry
    async fn set(&self, code: &GrntiCode) -> Result<Option<GrntiCode>, ApplicationError>;

    /// Delete an entry, returning its last state
    async fn delete(&self, codrub: i32) -> Result<Option<GrntiCode>, ApplicationError>;
}
