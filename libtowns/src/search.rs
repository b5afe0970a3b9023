//! Client-side searching of a collection of locations
use crate::location::Location;

/// Returns the locations whose name or description contains `term`, ignoring
/// case. A term that is empty or only whitespace matches every location. The
/// relative order of the locations is preserved.
pub fn filter_locations<'a>(term: &str, locations: &'a [Location]) -> Vec<&'a Location> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return locations.iter().collect();
    }
    locations
        .iter()
        .filter(|loc| {
            loc.name.to_lowercase().contains(&term)
                || loc
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}
