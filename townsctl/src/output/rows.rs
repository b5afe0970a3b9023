use crate::view;
use libtowns::Location;
use tabled::{Table, Tabled, builder::Builder};

/// One location in the list view, with a score bar for each scored activity
#[derive(Tabled)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct LocationRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    #[tabled(display("tabled::derive::display::option", ""))]
    description: Option<String>,
    activities: String,
}

impl LocationRow {
    pub(crate) fn new(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            description: location.description.clone(),
            activities: view::activity_lines(location).join("\n"),
        }
    }
}

/// All details about a location, one property per row, with a score bar for
/// each activity
pub(crate) fn location_card(location: &Location) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Id".to_string(), location.id.to_string()]);
    builder.push_record(["Name".to_string(), location.name.clone()]);
    builder.push_record([
        "Coordinates".to_string(),
        format!("{}, {}", location.latitude, location.longitude),
    ]);
    builder.push_record([
        "Description".to_string(),
        location.description.clone().unwrap_or_default(),
    ]);
    let activities = view::activity_lines(location);
    if !activities.is_empty() {
        builder.push_record(["Activities".to_string(), activities.join("\n")]);
    }
    builder.build()
}
