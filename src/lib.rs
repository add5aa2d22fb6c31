//! Taleo Business Edition API client library.
//!
//! Remote entities (employees, candidates, packets, activities, attachments,
//! locations) are exposed as resources whose relationships are declared once
//! per type and fetched lazily over HTTP the first time they are accessed.
//!
//! # Quick Start
//!
//! ```no_run
//! use taleo::{Candidate, Credentials, Fetch, Search, TaleoClient, Employee};
//!
//! #[tokio::main]
//! async fn main() -> taleo::Result<()> {
//!     // Create client and log in from environment variables
//!     let client = TaleoClient::from_env()?;
//!     client.login(&Credentials::from_env()?).await?;
//!
//!     // Fetch an employee by ID
//!     let mut employee = Employee::fetch(&client, 42).await?;
//!     println!("Employee: {} {}", employee.first_name()?, employee.last_name()?);
//!
//!     // Relationships are fetched on first access, then cached
//!     let packets = employee.packets().await?;
//!     println!("{} packets", packets.len());
//!
//!     // Page through employees
//!     let page = Employee::search_page(&client, 1, 10).await?;
//!     println!("{} employees in total", page.total);
//!
//!     // Download a resume
//!     let candidate = Candidate::fetch(&client, 1).await?;
//!     if candidate.has_resume() {
//!         let resume = candidate.resume().await?.bytes().await?;
//!         println!("Resume is {} bytes", resume.len());
//!     }
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`TaleoClient`] owns the session and validates every response envelope.
//! - [`ResourceKind`] is the static description of a resource type: its
//!   identifying field, its [`Relationship`]s and its download source.
//! - [`Resource`] wraps the raw attributes of one entity and resolves its
//!   relationships through the client, caching each one after first access.
//! - [`SearchResultSet`] is one page of a search.
//!
//! Typed entities such as [`Employee`] implement [`Entity`], which gives them
//! [`Fetch`] and [`Search`].
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] and [`Credentials::from_env`] read:
//!
//! - `TALEO_API_URL` (required) - Base URL of the API endpoint
//! - `TALEO_TIMEOUT_SECS` (optional) - Request timeout, defaults to 300
//! - `TALEO_AUTH_COOKIE` (optional) - Session cookie name, defaults to `authToken`
//! - `TALEO_ORG_CODE`, `TALEO_USERNAME`, `TALEO_PASSWORD` - Login credentials

mod client;
mod config;
mod download;
mod envelope;
mod error;
mod models;
mod output;
mod relationship;
mod resource;
mod search;
mod session;
mod traits;
mod transport;

pub mod cli;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::TaleoClient;
pub use config::{AuthScheme, ClientConfig, Credentials, DEFAULT_AUTH_COOKIE, DEFAULT_TIMEOUT};
pub use download::Download;
pub use error::{Result, TaleoError};
pub use relationship::{pluralize, Cardinality, DownloadSource, Relationship, ResourceKind, UrlSource};
pub use resource::{Related, Resource, RELATIONSHIP_URLS_FIELD};
pub use search::{next_start, page_len, previous_start, Pagination, SearchResultSet, DEFAULT_LIMIT};
pub use session::Session;

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{Entity, Fetch, Search};

// Re-export models
pub use models::{
    Activity, Attachment, Candidate, Employee, Location, Packet, ACTIVITY, ATTACHMENT, CANDIDATE,
    EMPLOYEE, LOCATION, PACKET,
};
