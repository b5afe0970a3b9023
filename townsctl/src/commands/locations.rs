//! Commands that manage locations through the api
use crate::{
    cli::Commands,
    client::{ClientError, LocationClient},
    output::{self, OutputFormat},
    view::{self, LocationsView},
};
use anyhow::{Result, anyhow};
use libtowns::{LocationInput, search::filter_locations};
use secrecy::SecretString;
use tracing::warn;

/// Pass a successful result on to `f`, or print a short notice if the
/// location doesn't exist
fn print_or_not_found<T>(
    id: i64,
    result: Result<T, ClientError>,
    f: impl FnOnce(T) -> Result<()>,
) -> Result<()> {
    match result {
        Ok(value) => f(value),
        Err(ClientError::NotFound) => {
            println!("Location {id} not found");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn list(view: LocationsView, search: Option<String>, format: OutputFormat) -> Result<()> {
    match view {
        LocationsView::Loaded(locations) => {
            let found = filter_locations(search.as_deref().unwrap_or_default(), &locations);
            if found.is_empty() && format == OutputFormat::Table {
                println!("No locations match '{}'", search.unwrap_or_default());
                return Ok(());
            }
            println!("{}", output::format_locations(found, format)?);
            Ok(())
        }
        LocationsView::Empty => {
            match format {
                OutputFormat::Table => println!("No locations found"),
                _ => println!("{}", output::format_locations([], format)?),
            }
            Ok(())
        }
        LocationsView::Failed(e) => {
            warn!(error = ?e, "Unable to load locations");
            Err(anyhow!(e).context("Unable to load locations"))
        }
    }
}

/// Handle every command that talks to the api
pub(crate) async fn handle_command(
    command: Commands,
    client: &LocationClient,
    map_token: Option<&SecretString>,
) -> Result<()> {
    match command {
        Commands::List { search, output } => {
            list(client.get_locations().await.into(), search, output.format)
        }
        Commands::Show { id, output } => {
            print_or_not_found(id, client.get_location(id).await, |location| {
                println!("{}", output::format_location(&location, output.format)?);
                Ok(())
            })
        }
        Commands::Add {
            name,
            latitude,
            longitude,
            description,
        } => {
            let input = LocationInput::new(name, latitude, longitude, description);
            let location = client.create_location(&input).await?;
            println!("Added location to database with id {}", location.id);
            Ok(())
        }
        Commands::Modify {
            id,
            name,
            latitude,
            longitude,
            description,
        } => {
            let input = LocationInput::new(name, latitude, longitude, description);
            print_or_not_found(id, client.update_location(id, &input).await, |location| {
                println!("Modified location {}", location.id);
                Ok(())
            })
        }
        Commands::Remove { id } => {
            print_or_not_found(id, client.delete_location(id).await, |message| {
                println!("{message}");
                Ok(())
            })
        }
        Commands::Map { id, zoom } => {
            let token = map_token.ok_or_else(|| {
                anyhow!("No map token configured, use --map-token or `townsctl configure`")
            })?;
            match id {
                Some(id) => print_or_not_found(id, client.get_location(id).await, |location| {
                    println!("{}", view::location_map_url(&location, zoom, token));
                    Ok(())
                }),
                None => match LocationsView::from(client.get_locations().await) {
                    LocationsView::Loaded(locations) => {
                        println!("{}", view::overview_map_url(&locations, token));
                        if locations.len() > view::MAX_MAP_MARKERS {
                            eprintln!(
                                "Only the first {} of {} locations are marked, use `townsctl list -o geojson` for all of them",
                                view::MAX_MAP_MARKERS,
                                locations.len()
                            );
                        }
                        Ok(())
                    }
                    LocationsView::Empty => {
                        println!("{}", view::overview_map_url([], token));
                        Ok(())
                    }
                    LocationsView::Failed(e) => {
                        warn!(error = ?e, "Unable to load locations");
                        Err(anyhow!(e).context("Unable to load locations"))
                    }
                },
            }
        }
        Commands::Configure | Commands::Admin { .. } => {
            Err(anyhow!("Command does not use the api"))
        }
    }
}
