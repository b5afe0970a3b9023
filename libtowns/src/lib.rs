//! This is a library that provides the objects shared by the outdoor towns directory: the
//! [location::Location] record and its activity scores, the JSON envelope that wraps every API
//! response, and a handle to the database that stores the locations.

pub mod activity;
pub mod database;
pub mod envelope;
pub mod error;
pub mod location;
pub mod search;

pub use database::Database;
pub use envelope::Envelope;
pub use error::Error;
pub use error::Result;
pub use location::{Location, LocationInput, LocationStore};
