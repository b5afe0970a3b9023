//! Presentation of locations: the list view, score bars and the map view
use crate::client::ClientError;
use libtowns::{
    Location,
    activity::{Activity, ActivityScore},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

/// Latitude and longitude that the overview map is centered on
pub const INITIAL_CENTER: (f64, f64) = (39.8283, -98.5795);
pub const INITIAL_ZOOM: f32 = 3.0;

const MAP_STYLE: &str = "mapbox/outdoors-v12";
const MAP_SIZE: &str = "800x500";
const MARKER: &str = "pin-s+ff0000";
const BAR_CHARS: usize = 20;

/// The most markers that are put on an overview map, so that the url stays
/// within the size that the map provider accepts
pub const MAX_MAP_MARKERS: usize = 100;

/// What the list view shows after trying to fetch the locations
#[derive(Debug)]
pub enum LocationsView {
    Loaded(Vec<Location>),
    Empty,
    Failed(ClientError),
}

impl From<Result<Vec<Location>, ClientError>> for LocationsView {
    fn from(value: Result<Vec<Location>, ClientError>) -> Self {
        match value {
            Ok(locations) if locations.is_empty() => Self::Empty,
            Ok(locations) => Self::Loaded(locations),
            Err(e) => Self::Failed(e),
        }
    }
}

/// A horizontal text bar for an activity score, followed by its width in
/// percent, e.g. `████████████········ 60%`
pub fn score_bar(score: ActivityScore) -> String {
    let width = usize::from(score.bar_width());
    let filled = width * BAR_CHARS / 100;
    format!(
        "{}{} {width}%",
        "█".repeat(filled),
        "·".repeat(BAR_CHARS - filled)
    )
}

/// One line per scored activity, in a fixed activity order
pub fn activity_lines(location: &Location) -> Vec<String> {
    location
        .activities
        .iter()
        .map(|(activity, score)| format!("{:<14} {}", activity.label(), score_bar(*score)))
        .collect()
}

fn feature(location: &Location) -> Value {
    let activities: serde_json::Map<String, Value> = location
        .activities
        .iter()
        .map(|(a, s): (&Activity, &ActivityScore)| (a.to_string(), json!(s.get())))
        .collect();
    json!({
        "type": "Feature",
        "id": location.id,
        "geometry": {
            "type": "Point",
            "coordinates": [location.longitude, location.latitude],
        },
        "properties": {
            "name": location.name,
            "description": location.description,
            "activities": activities,
        }
    })
}

/// The locations as a GeoJSON `FeatureCollection` with one point per location.
/// The name and description of each feature are what its popup shows.
pub fn feature_collection<'a, I>(locations: I) -> Value
where
    I: IntoIterator<Item = &'a Location>,
{
    json!({
        "type": "FeatureCollection",
        "features": locations.into_iter().map(feature).collect::<Vec<_>>(),
    })
}

fn marker(location: &Location) -> String {
    format!("{MARKER}({},{})", location.longitude, location.latitude)
}

fn static_map_url(overlay: &str, lat: f64, lon: f64, zoom: f32, token: &SecretString) -> String {
    let overlay = match overlay {
        "" => String::new(),
        o => format!("{o}/"),
    };
    format!(
        "https://api.mapbox.com/styles/v1/{MAP_STYLE}/static/{overlay}{lon},{lat},{zoom}/{MAP_SIZE}?access_token={}",
        token.expose_secret()
    )
}

/// A map image centered on a single location
pub fn location_map_url(location: &Location, zoom: f32, token: &SecretString) -> String {
    static_map_url(
        &marker(location),
        location.latitude,
        location.longitude,
        zoom,
        token,
    )
}

/// A map image of the initial view with a marker for each location, up to
/// [MAX_MAP_MARKERS]
pub fn overview_map_url<'a, I>(locations: I, token: &SecretString) -> String
where
    I: IntoIterator<Item = &'a Location>,
{
    let overlay = locations
        .into_iter()
        .take(MAX_MAP_MARKERS)
        .map(marker)
        .collect::<Vec<_>>()
        .join(",");
    let (lat, lon) = INITIAL_CENTER;
    static_map_url(&overlay, lat, lon, INITIAL_ZOOM, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libtowns::activity::Activities;

    fn moab() -> Location {
        let mut activities = Activities::new();
        activities.insert(Activity::Biking, ActivityScore::new(5).unwrap());
        activities.insert(Activity::Climbing, ActivityScore::new(3).unwrap());
        Location {
            id: 2,
            name: "Moab, Utah".to_string(),
            latitude: 38.5733,
            longitude: -109.5498,
            description: Some("Slickrock and canyon country".to_string()),
            activities,
        }
    }

    #[test]
    fn test_score_bar() {
        let bar = score_bar(ActivityScore::new(3).unwrap());
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 12);
        assert!(bar.ends_with(" 60%"));
        let bar = score_bar(ActivityScore::new(5).unwrap());
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 20);
        assert!(bar.ends_with(" 100%"));
        let bar = score_bar(ActivityScore::new(1).unwrap());
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 4);
        assert!(bar.ends_with(" 20%"));
    }

    #[test]
    fn test_activity_lines() {
        let lines = activity_lines(&moab());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Climbing"));
        assert!(lines[0].ends_with("60%"));
        assert!(lines[1].contains("Biking"));

        let mut unscored = moab();
        unscored.activities.clear();
        assert!(activity_lines(&unscored).is_empty());
    }

    #[test]
    fn test_view_states() {
        assert!(matches!(LocationsView::from(Ok(vec![])), LocationsView::Empty));
        assert!(matches!(
            LocationsView::from(Ok(vec![moab()])),
            LocationsView::Loaded(v) if v.len() == 1
        ));
        assert!(matches!(
            LocationsView::from(Err(ClientError::MissingData)),
            LocationsView::Failed(ClientError::MissingData)
        ));
    }

    #[test]
    fn test_feature_collection() {
        let locations = vec![moab()];
        let geojson = feature_collection(&locations);
        assert_eq!(geojson["type"], "FeatureCollection");
        let feature = &geojson["features"][0];
        assert_eq!(feature["id"], 2);
        assert_eq!(feature["geometry"]["coordinates"], json!([-109.5498, 38.5733]));
        assert_eq!(feature["properties"]["name"], "Moab, Utah");
        assert_eq!(
            feature["properties"]["description"],
            "Slickrock and canyon country"
        );
        assert_eq!(feature["properties"]["activities"]["biking"], 5);

        let empty: Vec<Location> = vec![];
        assert_eq!(feature_collection(&empty)["features"], json!([]));
    }

    #[test]
    fn test_map_urls() {
        let token = SecretString::from("pk.test");
        let url = location_map_url(&moab(), 10.0, &token);
        assert!(url.contains("/static/pin-s+ff0000(-109.5498,38.5733)/-109.5498,38.5733,10/"));
        assert!(url.ends_with("access_token=pk.test"));

        let url = overview_map_url(&[moab()], &token);
        assert!(url.contains("/static/pin-s+ff0000(-109.5498,38.5733)/-98.5795,39.8283,3/"));
    }

    #[test]
    fn test_overview_map_without_locations() {
        let token = SecretString::from("pk.test");
        let url = overview_map_url([], &token);
        assert!(!url.contains("/static//"));
        assert_eq!(
            url,
            "https://api.mapbox.com/styles/v1/mapbox/outdoors-v12/static/-98.5795,39.8283,3/800x500?access_token=pk.test"
        );
    }

    #[test]
    fn test_overview_map_marker_limit() {
        let token = SecretString::from("pk.test");
        let locations: Vec<Location> = (0..300)
            .map(|i| Location {
                id: i,
                latitude: 30.0 + f64::from(i as u32) / 100.0,
                ..moab()
            })
            .collect();
        let url = overview_map_url(&locations, &token);
        assert_eq!(url.matches("pin-s+ff0000").count(), MAX_MAP_MARKERS);
        assert!(url.len() < 8192);
    }
}
