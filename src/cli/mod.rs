//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the taleo binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::models::{ACTIVITY, ATTACHMENT, CANDIDATE, EMPLOYEE, LOCATION, PACKET};
use crate::relationship::ResourceKind;
use crate::search::DEFAULT_LIMIT;

/// Taleo Business Edition command-line interface.
#[derive(Parser, Debug)]
#[command(name = "taleo", about = "Taleo Business Edition API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: u64,
    },

    /// Search entities page by page.
    Search {
        /// The type of entity to search.
        entity: Entity,

        /// 1-based offset of the first result.
        #[arg(long, default_value_t = 1)]
        start: u32,

        /// Number of results per page.
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Resolve a relationship of an entity.
    Related {
        /// The type of the owning entity.
        entity: Entity,

        /// The owning entity's ID.
        id: u64,

        /// The relationship name (e.g. "employee", "attachments").
        relationship: String,
    },

    /// Download an entity's content.
    Download {
        /// The type of entity to download from.
        entity: Entity,

        /// The entity ID.
        id: u64,

        /// Download the URL stored under this relationship key instead
        /// (e.g. "resume" for candidates).
        #[arg(long)]
        relationship: Option<String>,

        /// File to write to; standard output when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An employee.
    #[value(alias = "employees")]
    Employee,
    /// A candidate.
    #[value(alias = "candidates")]
    Candidate,
    /// An onboarding activity packet.
    #[value(alias = "packets")]
    Packet,
    /// An onboarding activity.
    #[value(alias = "activities")]
    Activity,
    /// A candidate or employee attachment.
    #[value(alias = "attachments")]
    Attachment,
    /// A work location.
    #[value(alias = "locations")]
    Location,
}

impl Entity {
    /// The resource kind this entity type maps to.
    pub fn kind(self) -> &'static ResourceKind {
        match self {
            Self::Employee => &EMPLOYEE,
            Self::Candidate => &CANDIDATE,
            Self::Packet => &PACKET,
            Self::Activity => &ACTIVITY,
            Self::Attachment => &ATTACHMENT,
            Self::Location => &LOCATION,
        }
    }
}
