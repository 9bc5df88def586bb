//! Command dispatch
//!
//! Every subcommand maps onto exactly one service operation and yields the
//! resulting record(s) as JSON, or as plain text where asked for.

use std::sync::Arc;

use application::{
    ExpertInput, ExpertService, GrntiService, RegionCityService, format_for_display,
};
use domain::{Expert, GrntiCode, RegionCity};
use infrastructure::{ConnectionPool, SqliteExpertStore, SqliteGrntiStore, SqliteRegionCityStore};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::{
    Commands, ExpertCommand, ExpertFields, ExpertProfile, GrntiCommand, PlaceCommand, PlaceFields,
};

/// Services wired to one shared connection pool
#[derive(Debug)]
pub struct Services {
    pub experts: ExpertService,
    pub grnti: GrntiService,
    pub places: RegionCityService,
}

impl Services {
    pub fn new(pool: &Arc<ConnectionPool>) -> Self {
        Self {
            experts: ExpertService::new(Arc::new(SqliteExpertStore::new(Arc::clone(pool)))),
            grnti: GrntiService::new(Arc::new(SqliteGrntiStore::new(Arc::clone(pool)))),
            places: RegionCityService::new(Arc::new(SqliteRegionCityStore::new(Arc::clone(pool)))),
        }
    }
}

/// Result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Json(Value),
    Text(String),
}

impl Output {
    /// Render for stdout
    pub fn render(&self) -> anyhow::Result<String> {
        match self {
            Self::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

/// Run one command
pub async fn execute(command: Commands, services: &Services) -> anyhow::Result<Output> {
    match command {
        Commands::Expert(command) => execute_expert(command, &services.experts).await,
        Commands::Grnti(command) => execute_grnti(command, &services.grnti).await,
        Commands::Place(command) => execute_place(command, &services.places).await,
    }
}

fn to_json(record: &impl Serialize) -> anyhow::Result<Output> {
    Ok(Output::Json(serde_json::to_value(record)?))
}

/// `id  name  region  city  DD.MM.YYYY`, tab separated
pub fn expert_line(expert: &Expert) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        expert.id,
        expert.name,
        expert.region,
        expert.city,
        format_for_display(expert.input_date)
    )
}

fn expert_input(fields: ExpertFields, profile: ExpertProfile) -> ExpertInput {
    ExpertInput {
        name: fields.name,
        region: fields.region,
        city: fields.city,
        input_date: None,
        keywords: profile.keywords,
        group_count: profile.group_count,
    }
}

async fn execute_expert(
    command: ExpertCommand,
    service: &ExpertService,
) -> anyhow::Result<Output> {
    match command {
        ExpertCommand::Get { id } => to_json(&service.get_expert(id).await?),
        ExpertCommand::List {
            with_classification: true,
            ..
        } => to_json(&service.list_experts_with_classification().await?),
        ExpertCommand::List { plain: true, .. } => {
            let experts = service.list_experts().await?;
            let lines: Vec<String> = experts.iter().map(expert_line).collect();
            Ok(Output::Text(lines.join("\n")))
        },
        ExpertCommand::List { .. } => to_json(&service.list_experts().await?),
        ExpertCommand::Show { id } => to_json(&service.get_expert_with_classification(id).await?),
        ExpertCommand::Create {
            fields,
            date,
            profile,
            assignments,
        } => {
            let mut input = expert_input(fields, profile);
            input.input_date = date;

            if assignments.is_empty() {
                to_json(&service.create_expert(input).await?)
            } else {
                to_json(
                    &service
                        .create_expert_with_classifications(input, assignments)
                        .await?,
                )
            }
        },
        ExpertCommand::Update {
            id,
            fields,
            date,
            profile,
        } => {
            let expert = Expert {
                id,
                name: fields.name,
                region: fields.region,
                city: fields.city,
                input_date: date,
                keywords: profile.keywords,
                group_count: profile.group_count,
            };
            to_json(&service.update_expert(expert).await?)
        },
        ExpertCommand::Delete { id } => to_json(&service.delete_expert(id).await?),
        ExpertCommand::Classify { id, assignments } => {
            to_json(&service.replace_classifications(id, assignments).await?)
        },
        ExpertCommand::Check { fields } => {
            let valid = service.validate_expert_data(&fields.name, &fields.region, &fields.city);
            Ok(Output::Json(json!({ "valid": valid })))
        },
    }
}

async fn execute_grnti(command: GrntiCommand, service: &GrntiService) -> anyhow::Result<Output> {
    match command {
        GrntiCommand::Get { codrub } => to_json(&service.get_code(codrub).await?),
        GrntiCommand::List => to_json(&service.list_codes().await?),
        GrntiCommand::Create {
            codrub,
            description,
        } => to_json(&service.create_code(GrntiCode::new(codrub, description)).await?),
        GrntiCommand::Update {
            codrub,
            description,
        } => to_json(&service.update_code(GrntiCode::new(codrub, description)).await?),
        GrntiCommand::Delete { codrub } => to_json(&service.delete_code(codrub).await?),
    }
}

fn place(fields: PlaceFields) -> RegionCity {
    RegionCity::new(fields.region, fields.oblname, fields.city)
}

async fn execute_place(
    command: PlaceCommand,
    service: &RegionCityService,
) -> anyhow::Result<Output> {
    match command {
        PlaceCommand::Get { city } => to_json(&service.get_place(&city).await?),
        PlaceCommand::List => to_json(&service.list_places().await?),
        PlaceCommand::Create(fields) => to_json(&service.create_place(place(fields)).await?),
        PlaceCommand::Update(fields) => to_json(&service.update_place(place(fields)).await?),
        PlaceCommand::Delete { city } => to_json(&service.delete_place(&city).await?),
    }
}
