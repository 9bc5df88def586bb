//! Expert storage port
//!
//! Defines the interface for persisting experts and their GRNTI
//! classifications. Every write returns the row as the store persisted it.

use async_trait::async_trait;
use domain::{
    CreatedExpert, Expert, ExpertId, ExpertWithClassification, GrntiAssignmentDraft, NewExpert,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for expert persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExpertStore: Send + Sync {
    /// Get an expert by id
    async fn get(&self, id: ExpertId) -> Result<Option<Expert>, ApplicationError>;

    /// List all experts ordered by id
    async fn list_all(&self) -> Result<Vec<Expert>, ApplicationError>;

    /// Insert a new expert
    ///
    /// # Returns
    /// The persisted expert with its store-assigned id
    async fn create(&self, expert: &NewExpert) -> Result<Expert, ApplicationError>;

    /// Replace all mutable fields of an existing expert
    ///
    /// # Returns
    /// The row as persisted, or `None` if no expert has this id
    async fn set(&self, expert: &Expert) -> Result<Option<Expert>, ApplicationError>;

    /// Delete an expert
    ///
    /// # Returns
    /// The row's last state, or `None` if no expert has this id
    async fn delete(&self, id: ExpertId) -> Result<Option<Expert>, ApplicationError>;

    /// Insert an expert and its classifications as one batch
    ///
    /// Each classification is resolved to its classifier description.
    /// Nothing is persisted if any insert fails.
    async fn create_with_classifications(
        &self,
        expert: &NewExpert,
        assignments: &[GrntiAssignmentDraft],
    ) -> Result<CreatedExpert, ApplicationError>;

    /// Get an expert joined with its first classification
    async fn get_with_classification(
        &self,
        id: ExpertId,
    ) -> Result<Option<ExpertWithClassification>, ApplicationError>;

    /// List every expert/classification pair
    async fn list_all_with_classification(
        &self,
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError>;

    /// Replace the full classification set of an expert
    async fn replace_classifications(
        &self,
        id: ExpertId,
        assignments: &[GrntiAssignmentDraft],
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError>;
}
