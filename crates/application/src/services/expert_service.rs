//! Expert Service - Validated persistence of experts and their classifications

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use domain::{
    CreatedExpert, DomainError, Expert, ExpertId, ExpertWithClassification,
    GrntiAssignmentDraft, NewExpert, validate_expert, validate_new_expert, validate_record,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::ExpertStore};

const ENTITY: &str = "Expert";

/// Expert fields a caller may set when creating an expert
///
/// The id is assigned by the store. The input date defaults to today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertInput {
    pub name: String,
    pub region: String,
    pub city: String,
    #[serde(default)]
    pub input_date: Option<NaiveDate>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub group_count: Option<i32>,
}

impl ExpertInput {
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            city: city.into(),
            input_date: None,
            keywords: None,
            group_count: None,
        }
    }

    #[must_use]
    pub const fn with_input_date(mut self, input_date: NaiveDate) -> Self {
        self.input_date = Some(input_date);
        self
    }

    fn into_new_expert(self, today: NaiveDate) -> NewExpert {
        NewExpert {
            name: self.name,
            region: self.region,
            city: self.city,
            input_date: self.input_date.unwrap_or(today),
            keywords: self.keywords,
            group_count: self.group_count,
        }
    }
}

/// Service for expert use cases
pub struct ExpertService {
    store: Arc<dyn ExpertStore>,
}

impl std::fmt::Debug for ExpertService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpertService").finish_non_exhaustive()
    }
}

impl ExpertService {
    /// Create a new expert service
    pub fn new(store: Arc<dyn ExpertStore>) -> Self {
        Self { store }
    }

    /// Get an expert by id
    #[instrument(skip(self), fields(expert_id = %id))]
    pub async fn get_expert(&self, id: ExpertId) -> Result<Expert, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id).into())
    }

    /// List all experts
    #[instrument(skip(self))]
    pub async fn list_experts(&self) -> Result<Vec<Expert>, ApplicationError> {
        self.store.list_all().await
    }

    /// Validate and insert a new expert
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_expert(&self, input: ExpertInput) -> Result<Expert, ApplicationError> {
        let expert = input.into_new_expert(Local::now().date_naive());
        check_new_expert(&expert)?;

        let created = self.store.create(&expert).await?;
        info!(expert_id = %created.id, "Expert created");
        Ok(created)
    }

    /// Validate and fully replace an existing expert
    #[instrument(skip(self, expert), fields(expert_id = %expert.id))]
    pub async fn update_expert(&self, expert: Expert) -> Result<Expert, ApplicationError> {
        validate_record(&expert, "expert")?;
        if !validate_expert(&expert) {
            warn!("Rejected invalid expert data");
            return Err(DomainError::invalid("Invalid expert data").into());
        }

        let id = expert.id;
        let updated = self
            .store
            .set(&expert)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        info!("Expert updated");
        Ok(updated)
    }

    /// Delete an expert, returning its last state
    #[instrument(skip(self), fields(expert_id = %id))]
    pub async fn delete_expert(&self, id: ExpertId) -> Result<Expert, ApplicationError> {
        let deleted = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        info!("Expert deleted");
        Ok(deleted)
    }

    /// Create an expert together with its GRNTI classifications
    ///
    /// The business validator runs on the expert only; classifications are
    /// checked against their range constraints.
    #[instrument(skip(self, input, assignments), fields(name = %input.name, count = assignments.len()))]
    pub async fn create_expert_with_classifications(
        &self,
        input: ExpertInput,
        assignments: Vec<GrntiAssignmentDraft>,
    ) -> Result<CreatedExpert, ApplicationError> {
        let expert = input.into_new_expert(Local::now().date_naive());
        check_new_expert(&expert)?;
        check_assignments(&assignments)?;

        let created = self
            .store
            .create_with_classifications(&expert, &assignments)
            .await?;

        info!(
            expert_id = %created.expert.id,
            classifications = created.classifications.len(),
            "Expert created with classifications"
        );
        Ok(created)
    }

    /// Get an expert joined with its classification and classifier text
    #[instrument(skip(self), fields(expert_id = %id))]
    pub async fn get_expert_with_classification(
        &self,
        id: ExpertId,
    ) -> Result<ExpertWithClassification, ApplicationError> {
        self.store
            .get_with_classification(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id).into())
    }

    /// List every expert with every classification
    #[instrument(skip(self))]
    pub async fn list_experts_with_classification(
        &self,
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError> {
        self.store.list_all_with_classification().await
    }

    /// Replace the classification set of an existing expert
    #[instrument(skip(self, assignments), fields(expert_id = %id, count = assignments.len()))]
    pub async fn replace_classifications(
        &self,
        id: ExpertId,
        assignments: Vec<GrntiAssignmentDraft>,
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError> {
        check_assignments(&assignments)?;

        if self.store.get(id).await?.is_none() {
            return Err(DomainError::not_found(ENTITY, id).into());
        }

        let records = self.store.replace_classifications(id, &assignments).await?;
        info!(classifications = records.len(), "Classifications replaced");
        Ok(records)
    }

    /// Check candidate expert fields without touching the store
    pub fn validate_expert_data(&self, name: &str, region: &str, city: &str) -> bool {
        let candidate = NewExpert::new(name, region, city, Local::now().date_naive());
        let valid = validate_record(&candidate, "expert").is_ok() && validate_new_expert(&candidate);
        debug!(valid, "Checked expert data");
        valid
    }
}

fn check_new_expert(expert: &NewExpert) -> Result<(), ApplicationError> {
    validate_record(expert, "expert")?;
    if validate_new_expert(expert) {
        Ok(())
    } else {
        warn!("Rejected invalid expert data");
        Err(DomainError::invalid("Invalid expert data").into())
    }
}

fn check_assignments(assignments: &[GrntiAssignmentDraft]) -> Result<(), ApplicationError> {
    if assignments.is_empty() {
        return Err(DomainError::invalid("At least one GRNTI classification is required").into());
    }
    for assignment in assignments {
        validate_record(assignment, "GRNTI")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::GrntiCode;

    use super::*;
    use crate::ports::MockExpertStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn sample_expert(id: i64) -> Expert {
        NewExpert::new("Иванов И.И.", "Москва", "Москва", date()).into_expert(ExpertId::new(id))
    }

    fn valid_input() -> ExpertInput {
        ExpertInput::new("Иванов И.И.", "Москва", "Москва").with_input_date(date())
    }

    fn service(store: MockExpertStore) -> ExpertService {
        ExpertService::new(Arc::new(store))
    }

    fn composite(expert: &Expert, draft: &GrntiAssignmentDraft) -> ExpertWithClassification {
        ExpertWithClassification {
            expert: expert.clone(),
            assignment: draft.assign_to(expert.id),
            grnti: GrntiCode::new(draft.rubric, format!("Рубрика {}", draft.rubric)),
        }
    }

    #[tokio::test]
    async fn get_expert_returns_found_record() {
        let mut store = MockExpertStore::new();
        store
            .expect_get()
            .returning(|id| Ok(Some(sample_expert(id.as_i64()))));

        let expert = service(store).get_expert(ExpertId::new(4)).await.unwrap();
        assert_eq!(expert.id, ExpertId::new(4));
    }

    #[tokio::test]
    async fn get_expert_missing_is_not_found() {
        let mut store = MockExpertStore::new();
        store.expect_get().returning(|_| Ok(None));

        let err = service(store).get_expert(ExpertId::new(4)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Expert not found: 4");
    }

    #[tokio::test]
    async fn create_expert_defaults_input_date_to_today() {
        let mut store = MockExpertStore::new();
        store
            .expect_create()
            .returning(|draft| Ok(draft.clone().into_expert(ExpertId::new(1))));

        let input = ExpertInput::new("Петров П.П.", "Татарстан", "Казань");
        let created = service(store).create_expert(input).await.unwrap();
        assert_eq!(created.input_date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn create_expert_rejects_invalid_name_before_store() {
        let mut store = MockExpertStore::new();
        store.expect_create().never();

        let input = ExpertInput::new("ivanov I.I.", "Москва", "Москва");
        let err = service(store).create_expert(input).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn update_expert_returns_persisted_row() {
        let mut store = MockExpertStore::new();
        store.expect_set().returning(|expert| {
            let mut persisted = expert.clone();
            persisted.keywords = Some("химия".into());
            Ok(Some(persisted))
        });

        let updated = service(store).update_expert(sample_expert(2)).await.unwrap();
        assert_eq!(updated.keywords.as_deref(), Some("химия"));
    }

    #[tokio::test]
    async fn update_expert_missing_is_not_found() {
        let mut store = MockExpertStore::new();
        store.expect_set().returning(|_| Ok(None));

        let err = service(store).update_expert(sample_expert(99)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_expert_rejects_bad_city_before_store() {
        let mut store = MockExpertStore::new();
        store.expect_set().never();

        let mut expert = sample_expert(2);
        expert.city = "Moscow".into();
        let err = service(store).update_expert(expert).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn delete_missing_expert_is_not_found() {
        let mut store = MockExpertStore::new();
        store.expect_delete().returning(|_| Ok(None));

        let err = service(store).delete_expert(ExpertId::new(5)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let mut store = MockExpertStore::new();
        store
            .expect_delete()
            .returning(|_| Err(ApplicationError::Store("database is locked".into())));

        let err = service(store).delete_expert(ExpertId::new(5)).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Store(msg) if msg == "database is locked"));
    }

    #[tokio::test]
    async fn create_with_classifications_returns_explicit_expert() {
        let mut store = MockExpertStore::new();
        store
            .expect_create_with_classifications()
            .returning(|draft, assignments| {
                let expert = draft.clone().into_expert(ExpertId::new(10));
                let classifications = assignments.iter().map(|a| composite(&expert, a)).collect();
                Ok(CreatedExpert {
                    expert,
                    classifications,
                })
            });

        let created = service(store)
            .create_expert_with_classifications(
                valid_input(),
                vec![
                    GrntiAssignmentDraft::new(5, 10, 20),
                    GrntiAssignmentDraft::new(6, 11, 21),
                ],
            )
            .await
            .unwrap();

        assert_eq!(created.expert.id, ExpertId::new(10));
        assert_eq!(created.classifications.len(), 2);
        assert!(
            created
                .classifications
                .iter()
                .all(|c| c.assignment.expert_id == created.expert.id)
        );
    }

    #[tokio::test]
    async fn create_with_classifications_rejects_out_of_range_code() {
        let mut store = MockExpertStore::new();
        store.expect_create_with_classifications().never();

        let err = service(store)
            .create_expert_with_classifications(
                valid_input(),
                vec![GrntiAssignmentDraft::new(5, 100, 20)],
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn create_with_classifications_requires_assignments() {
        let mut store = MockExpertStore::new();
        store.expect_create_with_classifications().never();

        let err = service(store)
            .create_expert_with_classifications(valid_input(), Vec::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn create_with_classifications_validates_expert_only_by_pattern() {
        let mut store = MockExpertStore::new();
        store.expect_create_with_classifications().never();

        let input = ExpertInput::new("Иванов И.", "Москва", "Москва");
        let err = service(store)
            .create_expert_with_classifications(input, vec![GrntiAssignmentDraft::new(1, 1, 1)])
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn get_with_classification_missing_is_not_found() {
        let mut store = MockExpertStore::new();
        store.expect_get_with_classification().returning(|_| Ok(None));

        let err = service(store)
            .get_expert_with_classification(ExpertId::new(1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn replace_classifications_for_missing_expert_is_not_found() {
        let mut store = MockExpertStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_replace_classifications().never();

        let err = service(store)
            .replace_classifications(ExpertId::new(3), vec![GrntiAssignmentDraft::new(1, 2, 3)])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn replace_classifications_delegates_for_existing_expert() {
        let mut store = MockExpertStore::new();
        store
            .expect_get()
            .returning(|id| Ok(Some(sample_expert(id.as_i64()))));
        store
            .expect_replace_classifications()
            .times(1)
            .returning(|id, assignments| {
                let expert = sample_expert(id.as_i64());
                Ok(assignments.iter().map(|a| composite(&expert, a)).collect())
            });

        let records = service(store)
            .replace_classifications(ExpertId::new(3), vec![GrntiAssignmentDraft::new(7, 8, 9)])
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grnti.codrub, 7);
    }

    #[test]
    fn validate_expert_data_preflight() {
        let service = service(MockExpertStore::new());
        assert!(service.validate_expert_data("Иванов И.И.", "Москва", "Москва"));
        assert!(!service.validate_expert_data("ivanov I.I.", "Москва", "Москва"));
        assert!(!service.validate_expert_data("Иванов И.И.", "", "Москва"));
    }
}
