//! Objects related to reporting errors from this library

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("location {0} not found")]
    NotFound(i64),

    #[error("invalid activity score {0}: must be between 1 and 5")]
    InvalidActivityScore(i64),

    #[error("unknown activity '{0}', expected one of: {known}", known = crate::activity::Activity::known_names())]
    UnknownActivity(String),

    #[error("invalid activity assignment '{0}': expected ACTIVITY=SCORE")]
    InvalidActivityAssignment(String),

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    #[error(transparent)]
    DatabaseMigrationError(#[from] sqlx::migrate::MigrateError),
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
