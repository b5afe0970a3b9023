//! Formatting locations for the terminal or for other programs
use crate::view;
use clap::ValueEnum;
use libtowns::Location;
use rows::{LocationRow, location_card};
use tabled::{Table, settings::Style};

pub(crate) mod rows;

/// Data format for printing locations
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    /// Human readable table of data
    Table,
    /// JSON-formatted objects
    Json,
    /// YAML-formatted objects
    Yaml,
    /// A GeoJSON feature collection for loading into a map viewer
    Geojson,
}

pub(crate) trait TownsTable {
    fn styled(&mut self) -> &mut Self;
}

impl TownsTable for Table {
    fn styled(&mut self) -> &mut Self {
        self.with(Style::rounded())
    }
}

/// Format a single location in the given data format
pub(crate) fn format_location(location: &Location, fmt: OutputFormat) -> anyhow::Result<String> {
    match fmt {
        OutputFormat::Table => Ok(format!("{}", location_card(location).styled())),
        OutputFormat::Json => serde_json::to_string_pretty(location).map_err(|e| e.into()),
        OutputFormat::Yaml => serde_yaml::to_string(location).map_err(|e| e.into()),
        OutputFormat::Geojson => {
            serde_json::to_string_pretty(&view::feature_collection([location]))
                .map_err(|e| e.into())
        }
    }
}

/// Format a sequence of locations in the given data format
pub(crate) fn format_locations<'a, I>(locations: I, fmt: OutputFormat) -> anyhow::Result<String>
where
    I: IntoIterator<Item = &'a Location>,
{
    let locations: Vec<&Location> = locations.into_iter().collect();
    match fmt {
        OutputFormat::Table => {
            let mut table = Table::new(locations.iter().map(|l| LocationRow::new(l)));
            Ok(format!(
                "{}\n{} records found",
                table.styled(),
                locations.len()
            ))
        }
        OutputFormat::Json => serde_json::to_string_pretty(&locations).map_err(|e| e.into()),
        OutputFormat::Yaml => serde_yaml::to_string(&locations).map_err(|e| e.into()),
        OutputFormat::Geojson => {
            serde_json::to_string_pretty(&view::feature_collection(locations))
                .map_err(|e| e.into())
        }
    }
}
