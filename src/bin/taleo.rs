//! Taleo API CLI binary.
//!
//! A command-line interface for browsing the Taleo Business Edition API.

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tabled::{Table, Tabled};
use taleo::cli::{Cli, Command, Entity};
use taleo::{Credentials, PrettyPrint, Related, Resource, SearchResultSet, TaleoClient};
use tokio::io::AsyncWriteExt;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match connect().await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set TALEO_API_URL, TALEO_ORG_CODE, TALEO_USERNAME and TALEO_PASSWORD");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&client, cli).await;

    if let Err(e) = client.logout().await {
        tracing::warn!("logout failed: {e}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn connect() -> taleo::Result<TaleoClient> {
    let client = TaleoClient::from_env()?;
    client.login(&Credentials::from_env()?).await?;
    Ok(client)
}

async fn run(client: &TaleoClient, cli: Cli) -> taleo::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::Search {
            entity,
            start,
            limit,
        } => handle_search(client, entity, start, limit, cli.json).await,
        Command::Related {
            entity,
            id,
            relationship,
        } => handle_related(client, entity, id, &relationship, cli.json).await,
        Command::Download {
            entity,
            id,
            relationship,
            output,
        } => handle_download(client, entity, id, relationship.as_deref(), output).await,
    }
}

async fn handle_get(client: &TaleoClient, entity: Entity, id: u64, json: bool) -> taleo::Result<()> {
    let resource = client.fetch_object(entity.kind(), id).await?;
    output_single(&resource, json)
}

async fn handle_search(
    client: &TaleoClient,
    entity: Entity,
    start: u32,
    limit: u32,
    json: bool,
) -> taleo::Result<()> {
    let page = client.search(entity.kind(), start, limit).await?;
    output_page(&page, json)
}

async fn handle_related(
    client: &TaleoClient,
    entity: Entity,
    id: u64,
    relationship: &str,
    json: bool,
) -> taleo::Result<()> {
    let mut resource = client.fetch_object(entity.kind(), id).await?;
    match resource.get(relationship).await? {
        Related::One(related) => output_single(related, json),
        Related::Many(related) => output_list(related, json),
    }
}

async fn handle_download(
    client: &TaleoClient,
    entity: Entity,
    id: u64,
    relationship: Option<&str>,
    output: Option<std::path::PathBuf>,
) -> taleo::Result<()> {
    let resource = client.fetch_object(entity.kind(), id).await?;
    let download = match relationship {
        Some(key) => resource.download_relationship(key).await?,
        None => resource.download().await?,
    };

    let written = match output {
        Some(path) => {
            let mut file = tokio::fs::File::create(&path).await?;
            let written = download.copy_to(&mut file).await?;
            eprintln!("Wrote {written} bytes to {}", path.display());
            written
        }
        None => {
            let mut stdout = tokio::io::stdout();
            let written = download.copy_to(&mut stdout).await?;
            stdout.flush().await?;
            written
        }
    };
    tracing::debug!(written, "download complete");
    Ok(())
}

fn output_single(resource: &Resource, json: bool) -> taleo::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resource)?);
    } else {
        println!("{}", resource.pretty_print());
    }
    Ok(())
}

fn output_list(resources: &[Resource], json: bool) -> taleo::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resources)?);
    } else {
        let rows: Vec<ResourceRow> = resources.iter().map(ResourceRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page(page: &SearchResultSet, json: bool) -> taleo::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        output_list(&page.items, false)?;
        let end = u64::from(page.start) + page.len() as u64;
        println!(
            "\nResults {}-{} of {}{}",
            page.start,
            end.saturating_sub(1),
            page.total,
            if page.has_next() { " (more available)" } else { "" }
        );
    }
    Ok(())
}

// Table row type for non-JSON output

#[derive(Tabled)]
struct ResourceRow {
    id: String,
    name: String,
    relationships: String,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        let text = |field: &str| match r.attributes().get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        let name = match (text("firstName"), text("lastName")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => text("locationName")
                .or_else(|| text("activityDesc"))
                .or_else(|| text("attachmentType"))
                .unwrap_or_default(),
        };

        let mut relationships: Vec<&str> = r.relationship_urls().keys().map(String::as_str).collect();
        relationships.sort_unstable();

        Self {
            id: r.id().to_string(),
            name,
            relationships: relationships.join(", "),
        }
    }
}
