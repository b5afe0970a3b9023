use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use libtowns::activity::{Activity, ActivityScore, parse_assignment};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TOWNS_API_URL",
        help = "Base url of the locations api, e.g. http://localhost:5000/api"
    )]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "Maximum time in seconds to wait for the api")]
    pub timeout: Option<u64>,
    #[arg(
        long,
        global = true,
        env = "TOWNS_MAP_TOKEN",
        hide_env_values = true,
        help = "Access token for the map provider"
    )]
    pub map_token: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Save the api url, timeout and map token to the config file")]
    Configure,
    #[command(about = "List all locations")]
    List {
        #[arg(short, long, help = "Only show locations whose name or description contains this text")]
        search: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    #[command(about = "Show all details about a location")]
    Show {
        id: i64,
        #[command(flatten)]
        output: OutputArgs,
    },
    #[command(about = "Add a new location")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long = "lat", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long = "long", allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(
        about = "Replace the properties of a location",
        long_about = "Replace the properties of a location. All properties are overwritten, \
                      so leaving out the description removes it from the location."
    )]
    Modify {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long = "lat", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long = "long", allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(about = "Remove an existing location")]
    Remove { id: i64 },
    #[command(about = "Print a link to a map of one location, or of all locations")]
    Map {
        id: Option<i64>,
        #[arg(long, default_value_t = 10.0)]
        zoom: f32,
    },
    #[command(about = "Administer the locations database directly")]
    Admin {
        #[arg(short, long, env = "TOWNS_DATABASE")]
        database: String,
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    #[command(about = "List the names of all locations in the database")]
    Names,
    #[command(about = "Import locations with activity scores from a json file")]
    Import { file: PathBuf },
    #[command(about = "Set activity scores for a location, e.g. `hiking=4 dogs=5`")]
    SetActivities {
        id: i64,
        #[arg(required = true, value_parser = parse_assignment)]
        scores: Vec<(Activity, ActivityScore)>,
        #[arg(long, help = "Remove all existing scores first")]
        replace: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_activities() {
        let cli = Cli::try_parse_from([
            "townsctl",
            "admin",
            "--database",
            "towns.sqlite",
            "set-activities",
            "3",
            "hiking=4",
            "dogs=5",
        ])
        .expect("failed to parse");
        match cli.command {
            Commands::Admin {
                database,
                command:
                    AdminCommands::SetActivities {
                        id,
                        scores,
                        replace,
                    },
            } => {
                assert_eq!(database, "towns.sqlite");
                assert_eq!(id, 3);
                assert_eq!(scores.len(), 2);
                assert_eq!(scores[0].0, Activity::Hiking);
                assert_eq!(scores[1].1.get(), 5);
                assert!(!replace);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(
            Cli::try_parse_from(["townsctl", "admin", "-d", "x", "set-activities", "3", "hiking=9"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "townsctl",
            "add",
            "--name",
            "Trailhead Park",
            "--lat",
            "40.0",
            "--long",
            "-105.0",
        ])
        .expect("failed to parse");
        match cli.command {
            Commands::Add {
                longitude,
                description,
                ..
            } => {
                assert_eq!(longitude, -105.0);
                assert_eq!(description, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
