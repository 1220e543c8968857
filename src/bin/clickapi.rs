//! ClickUp API CLI binary.
//!
//! A command-line interface for browsing and editing ClickUp resources.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clickapi::cli::{Cli, Command};
use clickapi::output::{ModelRow, PrettyPrint};
use clickapi::{Builder, ClickUpClient, ClickUpError, Collection, Model, ModelKind};
use tabled::Table;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = ModelKind::validate_registry() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let client = match ClickUpClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CLICKUP_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(Builder::for_client(client), cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(clickup: Builder, cli: Cli) -> clickapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => {
            let model = find(&clickup, entity, &id).await?;
            output_single(&model, cli.json)
        }
        Command::List {
            entity,
            parent,
            parent_id,
            filters,
        } => {
            let mut builder = match (parent, parent_id) {
                (Some(parent), Some(parent_id)) => {
                    let parent = clickup
                        .new_instance_for(parent)
                        .where_id(parent_id)
                        .model()?
                        .clone();
                    clickup.new_instance_for(entity).set_parent(Arc::new(parent))
                }
                _ => clickup.new_instance_for(entity),
            };

            for (key, value) in filters {
                builder = builder.where_(key, parse_value(value));
            }

            output_collection(&builder.get().await?, cli.json)
        }
        Command::Update { entity, id, fields } => {
            let mut model = find(&clickup, entity, &id).await?;
            model.fill(fields.into_iter().map(|(key, value)| (key, parse_value(value))))?;
            model.save_or_fail().await?;
            output_single(&model, cli.json)
        }
        Command::Delete { entity, id } => {
            let model = find(&clickup, entity, &id).await?;
            if !model.delete().await? {
                return Err(ClickUpError::ApiError {
                    message: format!("could not delete {entity} {id}"),
                    status_code: None,
                });
            }
            eprintln!("Deleted {entity} {id}");
            Ok(())
        }
        Command::Whoami => {
            let user = clickup.user().await?.ok_or_else(|| ClickUpError::ApiError {
                message: "no user returned for this token".to_string(),
                status_code: None,
            })?;
            output_single(&user, cli.json)
        }
    }
}

async fn find(clickup: &Builder, entity: ModelKind, id: &str) -> clickapi::Result<Model> {
    clickup
        .new_instance_for(entity)
        .find(id)
        .await?
        .ok_or_else(|| ClickUpError::ApiError {
            message: format!("{entity} {id} not found"),
            status_code: Some(404),
        })
}

/// `true`, `3` or `[1,2]` are sent as JSON, anything else as a string.
fn parse_value(raw: String) -> serde_json::Value {
    serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
}

fn output_single(model: &Model, json: bool) -> clickapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(model)?);
    } else {
        println!("{}", model.pretty_print());
    }
    Ok(())
}

fn output_collection(collection: &Collection, json: bool) -> clickapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(collection)?);
    } else {
        let rows: Vec<ModelRow> = collection.iter().map(ModelRow::from).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", collection.len());
    }
    Ok(())
}
