//! SQLite expert store implementation
//!
//! Implements the ExpertStore port. Expert/classification batches run inside
//! a single transaction.

use std::sync::Arc;

use application::{ApplicationError, ExpertStore, format_for_storage};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    CreatedExpert, Expert, ExpertGrntiAssignment, ExpertId, ExpertWithClassification,
    GrntiAssignmentDraft, GrntiCode, NewExpert,
};
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, with_connection};

const EXPERT_COLUMNS: &str = "id, name, region, city, input_date, keywords, group_count";

const JOINED_SELECT: &str = "
    SELECT e.id, e.name, e.region, e.city, e.input_date, e.keywords, e.group_count,
           eg.rubric, eg.subrubric, eg.discipline, g.description
    FROM expert e
    JOIN expert_grnti eg ON eg.id = e.id
    JOIN grnti_classifier g ON g.codrub = eg.rubric";

/// SQLite-based expert store
#[derive(Debug, Clone)]
pub struct SqliteExpertStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteExpertStore {
    /// Create a new SQLite expert store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpertStore for SqliteExpertStore {
    #[instrument(skip(self), fields(expert_id = %id))]
    async fn get(&self, id: ExpertId) -> Result<Option<Expert>, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                &format!("SELECT {EXPERT_COLUMNS} FROM expert WHERE id = ?1"),
                [id.as_i64()],
                row_to_expert,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Expert>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let mut stmt = conn.prepare(&format!("SELECT {EXPERT_COLUMNS} FROM expert ORDER BY id"))?;
            let experts: rusqlite::Result<Vec<Expert>> =
                stmt.query_map([], row_to_expert)?.collect();
            experts
        })
        .await
    }

    #[instrument(skip(self, expert), fields(name = %expert.name))]
    async fn create(&self, expert: &NewExpert) -> Result<Expert, ApplicationError> {
        let expert = expert.clone();

        with_connection(&self.pool, move |conn| {
            let created = insert_expert(conn, &expert)?;
            debug!(expert_id = %created.id, "Inserted expert");
            Ok(created)
        })
        .await
    }

    #[instrument(skip(self, expert), fields(expert_id = %expert.id))]
    async fn set(&self, expert: &Expert) -> Result<Option<Expert>, ApplicationError> {
        let expert = expert.clone();

        with_connection(&self.pool, move |conn| {
            conn.query_row(
                &format!(
                    "UPDATE expert
                     SET name = ?1, region = ?2, city = ?3, input_date = ?4,
                         keywords = ?5, group_count = ?6
                     WHERE id = ?7
                     RETURNING {EXPERT_COLUMNS}"
                ),
                params![
                    expert.name,
                    expert.region,
                    expert.city,
                    format_for_storage(expert.input_date),
                    expert.keywords,
                    expert.group_count,
                    expert.id.as_i64(),
                ],
                row_to_expert,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self), fields(expert_id = %id))]
    async fn delete(&self, id: ExpertId) -> Result<Option<Expert>, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                &format!("DELETE FROM expert WHERE id = ?1 RETURNING {EXPERT_COLUMNS}"),
                [id.as_i64()],
                row_to_expert,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self, expert, assignments), fields(name = %expert.name, count = assignments.len()))]
    async fn create_with_classifications(
        &self,
        expert: &NewExpert,
        assignments: &[GrntiAssignmentDraft],
    ) -> Result<CreatedExpert, ApplicationError> {
        let expert = expert.clone();
        let assignments = assignments.to_vec();

        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;

            let created = insert_expert(&tx, &expert)?;
            let classifications = assignments
                .iter()
                .map(|draft| insert_assignment(&tx, &created, *draft))
                .collect::<Result<Vec<_>, _>>()?;

            tx.commit()?;
            debug!(expert_id = %created.id, "Inserted expert with classifications");

            Ok(CreatedExpert {
                expert: created,
                classifications,
            })
        })
        .await
    }

    #[instrument(skip(self), fields(expert_id = %id))]
    async fn get_with_classification(
        &self,
        id: ExpertId,
    ) -> Result<Option<ExpertWithClassification>, ApplicationError> {
        with_connection(&self.pool, move |conn| {
            conn.query_row(
                &format!(
                    "{JOINED_SELECT}
                     WHERE e.id = ?1
                     ORDER BY eg.rubric, eg.subrubric, eg.discipline
                     LIMIT 1"
                ),
                [id.as_i64()],
                row_to_classified,
            )
            .optional()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_all_with_classification(
        &self,
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError> {
        with_connection(&self.pool, |conn| {
            let mut stmt = conn.prepare(&format!(
                "{JOINED_SELECT}
                 ORDER BY e.id, eg.rubric, eg.subrubric, eg.discipline"
            ))?;
            let records: rusqlite::Result<Vec<ExpertWithClassification>> =
                stmt.query_map([], row_to_classified)?.collect();
            records
        })
        .await
    }

    #[instrument(skip(self, assignments), fields(expert_id = %id, count = assignments.len()))]
    async fn replace_classifications(
        &self,
        id: ExpertId,
        assignments: &[GrntiAssignmentDraft],
    ) -> Result<Vec<ExpertWithClassification>, ApplicationError> {
        let assignments = assignments.to_vec();

        with_connection(&self.pool, move |conn| {
            let tx = conn.transaction()?;

            let removed = tx.execute("DELETE FROM expert_grnti WHERE id = ?1", [id.as_i64()])?;
            let expert = tx.query_row(
                &format!("SELECT {EXPERT_COLUMNS} FROM expert WHERE id = ?1"),
                [id.as_i64()],
                row_to_expert,
            )?;
            let records = assignments
                .iter()
                .map(|draft| insert_assignment(&tx, &expert, *draft))
                .collect::<Result<Vec<_>, _>>()?;

            tx.commit()?;
            debug!(removed, added = records.len(), "Replaced classifications");
            Ok(records)
        })
        .await
    }
}

fn insert_expert(conn: &Connection, expert: &NewExpert) -> rusqlite::Result<Expert> {
    conn.query_row(
        &format!(
            "INSERT INTO expert (name, region, city, input_date, keywords, group_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {EXPERT_COLUMNS}"
        ),
        params![
            expert.name,
            expert.region,
            expert.city,
            format_for_storage(expert.input_date),
            expert.keywords,
            expert.group_count,
        ],
        row_to_expert,
    )
}

/// Insert one assignment and resolve its rubric to the classifier entry
fn insert_assignment(
    conn: &Connection,
    expert: &Expert,
    draft: GrntiAssignmentDraft,
) -> rusqlite::Result<ExpertWithClassification> {
    let assignment = draft.assign_to(expert.id);

    conn.execute(
        "INSERT INTO expert_grnti (id, rubric, subrubric, discipline) VALUES (?1, ?2, ?3, ?4)",
        params![
            assignment.expert_id.as_i64(),
            assignment.rubric,
            assignment.subrubric,
            assignment.discipline,
        ],
    )?;

    let description: String = conn.query_row(
        "SELECT g.description
         FROM expert_grnti eg
         JOIN grnti_classifier g ON g.codrub = eg.rubric
         WHERE eg.rowid = ?1",
        [conn.last_insert_rowid()],
        |row| row.get(0),
    )?;

    Ok(ExpertWithClassification {
        expert: expert.clone(),
        assignment,
        grnti: GrntiCode::new(assignment.rubric, description),
    })
}

fn parse_stored_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_expert(row: &Row<'_>) -> rusqlite::Result<Expert> {
    Ok(Expert {
        id: ExpertId::new(row.get(0)?),
        name: row.get(1)?,
        region: row.get(2)?,
        city: row.get(3)?,
        input_date: parse_stored_date(row, 4)?,
        keywords: row.get(5)?,
        group_count: row.get(6)?,
    })
}

fn row_to_classified(row: &Row<'_>) -> rusqlite::Result<ExpertWithClassification> {
    let expert = row_to_expert(row)?;
    let assignment = ExpertGrntiAssignment {
        expert_id: expert.id,
        rubric: row.get(7)?,
        subrubric: row.get(8)?,
        discipline: row.get(9)?,
    };
    let grnti = GrntiCode::new(assignment.rubric, row.get::<_, String>(10)?);

    Ok(ExpertWithClassification {
        expert,
        assignment,
        grnti,
    })
}
