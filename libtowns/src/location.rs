//! Objects to manage the locations in the directory
use crate::{
    Database,
    activity::Activities,
    error::{Error, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use tracing::debug;

/// A place listed in the directory, along with how well it suits various
/// outdoor activities
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that is assigned by the database when the location is created
    pub id: i64,

    /// The name of the location, e.g. "Bend, Oregon"
    pub name: String,

    /// Latitude in degrees, between -90 and 90
    pub latitude: f64,

    /// Longitude in degrees, between -180 and 180
    pub longitude: f64,

    /// An optional longer description of the location
    #[serde(default)]
    pub description: Option<String>,

    /// Scores for the activities that this location has been rated for
    #[sqlx(json)]
    #[serde(default)]
    pub activities: Activities,
}

/// The fields that a client provides when creating or updating a location.
///
/// None of the fields are checked before they are written to the database.
/// A missing `name` or an out-of-range coordinate is rejected by the
/// database itself.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct LocationInput {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
}

impl LocationInput {
    pub fn new(
        name: String,
        latitude: f64,
        longitude: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            name: Some(name),
            latitude: Some(latitude),
            longitude: Some(longitude),
            description,
        }
    }

    /// Add a new location with these fields to the database and return the
    /// stored row, including its newly assigned id
    pub async fn insert(&self, db: &Database) -> Result<Location> {
        sqlx::query_as(
            r#"INSERT INTO locations (name, latitude, longitude, description)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, latitude, longitude, description, activities"#,
        )
        .bind(&self.name)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(&self.description)
        .fetch_one(db.pool())
        .await
        .map_err(|e| e.into())
    }
}

/// A complete location record, including activity scores, that can be
/// imported into the database in bulk
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct NewLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub activities: Activities,
}

impl NewLocation {
    pub async fn insert(&self, db: &Database) -> Result<Location> {
        sqlx::query_as(
            r#"INSERT INTO locations (name, latitude, longitude, description, activities)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, latitude, longitude, description, activities"#,
        )
        .bind(&self.name)
        .bind(self.latitude)
        .bind(self.longitude)
        .bind(&self.description)
        .bind(Json(&self.activities))
        .fetch_one(db.pool())
        .await
        .map_err(|e| e.into())
    }
}

impl Location {
    /// Loads all locations from the database
    pub async fn load_all(db: &Database) -> Result<Vec<Location>> {
        sqlx::query_as(
            r#"SELECT id, name, latitude, longitude, description, activities
            FROM locations ORDER BY id"#,
        )
        .fetch_all(db.pool())
        .await
        .map_err(|e| e.into())
    }

    /// Loads the location with the given id from the database
    pub async fn load(id: i64, db: &Database) -> Result<Location> {
        sqlx::query_as(
            r#"SELECT id, name, latitude, longitude, description, activities
            FROM locations WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or(Error::NotFound(id))
    }

    /// Overwrite the name, coordinates and description of the location with
    /// the given id. Every field of `input` is written, so a field that is
    /// `None` is cleared in the database. Activity scores are left untouched.
    pub async fn update(id: i64, input: &LocationInput, db: &Database) -> Result<Location> {
        sqlx::query_as(
            r#"UPDATE locations SET name = ?, latitude = ?, longitude = ?, description = ?
            WHERE id = ?
            RETURNING id, name, latitude, longitude, description, activities"#,
        )
        .bind(&input.name)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.description)
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or(Error::NotFound(id))
    }

    /// Permanently removes the location with the given id and returns the
    /// deleted row
    pub async fn delete_id(id: i64, db: &Database) -> Result<Location> {
        sqlx::query_as(
            r#"DELETE FROM locations WHERE id = ?
            RETURNING id, name, latitude, longitude, description, activities"#,
        )
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or(Error::NotFound(id))
    }

    /// Replace the activity scores of the location with the given id
    pub async fn set_activities(
        id: i64,
        activities: &Activities,
        db: &Database,
    ) -> Result<Location> {
        debug!(id, ?activities, "Setting activity scores");
        sqlx::query_as(
            r#"UPDATE locations SET activities = ? WHERE id = ?
            RETURNING id, name, latitude, longitude, description, activities"#,
        )
        .bind(Json(activities))
        .bind(id)
        .fetch_optional(db.pool())
        .await?
        .ok_or(Error::NotFound(id))
    }

    /// The names of every location in the database, sorted alphabetically
    pub async fn names(db: &Database) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT name FROM locations ORDER BY name")
            .fetch_all(db.pool())
            .await
            .map_err(|e| e.into())
    }
}

/// The operations that the HTTP layer performs on the locations table. Each
/// call is a single, independent interaction with the store.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Location>>;
    async fn get(&self, id: i64) -> Result<Location>;
    async fn create(&self, input: &LocationInput) -> Result<Location>;
    async fn update(&self, id: i64, input: &LocationInput) -> Result<Location>;
    async fn delete(&self, id: i64) -> Result<Location>;
}

#[async_trait]
impl LocationStore for Database {
    async fn list(&self) -> Result<Vec<Location>> {
        Location::load_all(self).await
    }

    async fn get(&self, id: i64) -> Result<Location> {
        Location::load(id, self).await
    }

    async fn create(&self, input: &LocationInput) -> Result<Location> {
        input.insert(self).await
    }

    async fn update(&self, id: i64, input: &LocationInput) -> Result<Location> {
        Location::update(id, input, self).await
    }

    async fn delete(&self, id: i64) -> Result<Location> {
        Location::delete_id(id, self).await
    }
}
