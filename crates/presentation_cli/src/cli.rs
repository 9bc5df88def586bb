//! Command-line arguments

use std::path::PathBuf;

use application::parse_required_date;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use domain::{ExpertId, GrntiAssignmentDraft};

/// Expert registry CLI
#[derive(Debug, Parser)]
#[command(name = "expert-registry")]
#[command(author, version, about = "Expert registry with GRNTI classification", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// SQLite database path, overriding configuration
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage experts and their classifications
    #[command(subcommand)]
    Expert(ExpertCommand),

    /// Manage the GRNTI classifier
    #[command(subcommand)]
    Grnti(GrntiCommand),

    /// Manage the region / city lookup table
    #[command(subcommand)]
    Place(PlaceCommand),
}

/// Name, region and city of an expert
#[derive(Debug, Clone, Args)]
pub struct ExpertFields {
    /// Surname and initials, e.g. "Иванов И.И."
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub region: String,

    #[arg(long)]
    pub city: String,
}

/// Optional expert profile fields
#[derive(Debug, Clone, Args)]
pub struct ExpertProfile {
    /// Free-form keywords
    #[arg(long)]
    pub keywords: Option<String>,

    /// Number of expert groups the expert belongs to
    #[arg(long)]
    pub group_count: Option<i32>,
}

#[derive(Debug, Subcommand)]
pub enum ExpertCommand {
    /// Show one expert
    Get { id: ExpertId },

    /// List experts
    List {
        /// Include every GRNTI classification
        #[arg(long, conflicts_with = "plain")]
        with_classification: bool,

        /// One tab-separated line per expert, dates as DD.MM.YYYY
        #[arg(long)]
        plain: bool,
    },

    /// Show an expert with its first classification
    Show { id: ExpertId },

    /// Create an expert, optionally with classifications
    ///
    /// Example: expert-registry expert create --name "Иванов И.И." --region Москва
    ///   --city Москва --grnti 5.10.20 --grnti 6.11.21
    Create {
        #[command(flatten)]
        fields: ExpertFields,

        /// Input date (defaults to today)
        #[arg(long, value_parser = parse_required_date)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        profile: ExpertProfile,

        /// Classification as rubric.subrubric.discipline (repeatable)
        #[arg(long = "grnti", value_parser = parse_assignment)]
        assignments: Vec<GrntiAssignmentDraft>,
    },

    /// Replace every field of an expert
    Update {
        id: ExpertId,

        #[command(flatten)]
        fields: ExpertFields,

        #[arg(long, value_parser = parse_required_date)]
        date: NaiveDate,

        #[command(flatten)]
        profile: ExpertProfile,
    },

    /// Delete an expert and its classifications
    Delete { id: ExpertId },

    /// Replace the classifications of an expert
    Classify {
        id: ExpertId,

        /// Classification as rubric.subrubric.discipline (repeatable)
        #[arg(long = "grnti", value_parser = parse_assignment, required = true)]
        assignments: Vec<GrntiAssignmentDraft>,
    },

    /// Check name, region and city without saving anything
    Check {
        #[command(flatten)]
        fields: ExpertFields,
    },
}

#[derive(Debug, Subcommand)]
pub enum GrntiCommand {
    /// Show one classifier entry
    Get { codrub: i32 },

    /// List classifier entries
    List,

    /// Add a classifier entry
    Create { codrub: i32, description: String },

    /// Change the description of an entry
    Update { codrub: i32, description: String },

    /// Delete an unused entry
    Delete { codrub: i32 },
}

/// Region, oblast and city of a place
#[derive(Debug, Clone, Args)]
pub struct PlaceFields {
    #[arg(long)]
    pub region: String,

    #[arg(long)]
    pub oblname: String,

    #[arg(long)]
    pub city: String,
}

#[derive(Debug, Subcommand)]
pub enum PlaceCommand {
    /// Show a place by city
    Get { city: String },

    /// List places
    List,

    /// Add a place
    Create(PlaceFields),

    /// Change region and oblast of a city
    Update(PlaceFields),

    /// Delete a place by city
    Delete { city: String },
}

/// Parse `rubric.subrubric.discipline`, e.g. `5.10.20`
pub fn parse_assignment(input: &str) -> Result<GrntiAssignmentDraft, String> {
    let parts = input
        .trim()
        .split('.')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("'{input}': {e}"))?;

    match parts.as_slice() {
        [rubric, subrubric, discipline] => {
            Ok(GrntiAssignmentDraft::new(*rubric, *subrubric, *discipline))
        },
        _ => Err(format!("'{input}': expected rubric.subrubric.discipline")),
    }
}

/// Determine log filter level from verbosity count
///
/// Returns `None` when no `-v` was given so configuration decides.
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
