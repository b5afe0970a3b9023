//! Commands that work on the locations database directly rather than through
//! the api
use crate::cli::AdminCommands;
use anyhow::{Context, Result};
use libtowns::{
    Database, Location,
    activity::{Activities, Activity, ActivityScore},
    database::PoolOptions,
    location::NewLocation,
};
use std::{collections::HashSet, path::Path};
use tokio::fs;
use tracing::{debug, info};

/// The outcome of importing a batch of locations
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ImportSummary {
    pub(crate) added: Vec<Location>,
    pub(crate) skipped: Vec<String>,
}

/// Insert every location in `entries` whose name doesn't already exist in the
/// database. Names are compared without regard to case, including against
/// entries earlier in the same batch.
pub(crate) async fn import_locations(
    entries: Vec<NewLocation>,
    db: &Database,
) -> Result<ImportSummary> {
    let mut existing: HashSet<String> = Location::names(db)
        .await?
        .into_iter()
        .map(|n| n.to_lowercase())
        .collect();
    let mut summary = ImportSummary::default();
    for entry in entries {
        if !existing.insert(entry.name.to_lowercase()) {
            debug!(name = %entry.name, "Skipping existing location");
            summary.skipped.push(entry.name);
            continue;
        }
        let location = entry
            .insert(db)
            .await
            .with_context(|| format!("Failed to import location '{}'", entry.name))?;
        info!(id = location.id, name = %location.name, "Imported location");
        summary.added.push(location);
    }
    Ok(summary)
}

async fn read_import_file(path: &Path) -> Result<Vec<NewLocation>> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("'{}' is not a list of locations", path.display()))
}

/// Merge `scores` into the existing activity scores of a location, or replace
/// them completely
pub(crate) async fn set_activities(
    id: i64,
    scores: Vec<(Activity, ActivityScore)>,
    replace: bool,
    db: &Database,
) -> Result<Location> {
    let mut activities: Activities = match replace {
        true => Activities::new(),
        false => Location::load(id, db).await?.activities,
    };
    activities.extend(scores);
    Ok(Location::set_activities(id, &activities, db).await?)
}

/// Handle the `townsctl admin` command and its subcommands
pub(crate) async fn handle_command(database: String, command: AdminCommands) -> Result<()> {
    let db = Database::open(&database, &PoolOptions::default())
        .await
        .with_context(|| format!("Failed to open database '{database}'"))?;
    match command {
        AdminCommands::Names => {
            for name in Location::names(&db).await? {
                println!("{name}");
            }
            Ok(())
        }
        AdminCommands::Import { file } => {
            let entries = read_import_file(&file).await?;
            let summary = import_locations(entries, &db).await?;
            for name in &summary.skipped {
                println!("Skipped '{name}': a location with this name already exists");
            }
            println!("Imported {} locations", summary.added.len());
            Ok(())
        }
        AdminCommands::SetActivities {
            id,
            scores,
            replace,
        } => match set_activities(id, scores, replace, &db).await {
            Ok(location) => {
                println!("Updated activity scores for '{}'", location.name);
                Ok(())
            }
            Err(e) => match e.downcast_ref::<libtowns::Error>() {
                Some(libtowns::Error::NotFound(_)) => {
                    println!("Location {id} not found");
                    Ok(())
                }
                _ => Err(e),
            },
        },
    }
}
