use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use libtowns::{Envelope, Location};
use strum_macros::Display;
use tracing::{debug, error};

/// The operations of the locations api. The display representation of each
/// operation is the message that is returned to the client when the operation
/// fails unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Operation {
    #[strum(to_string = "Error fetching locations")]
    List,
    #[strum(to_string = "Error fetching location")]
    Get,
    #[strum(to_string = "Error creating location")]
    Create,
    #[strum(to_string = "Error updating location")]
    Update,
    #[strum(to_string = "Error deleting location")]
    Delete,
}

impl Operation {
    /// Convert an error returned by the store during this operation into an
    /// api error
    pub(crate) fn fail(self, err: libtowns::Error) -> Error {
        match err {
            libtowns::Error::NotFound(_) => Error::NotFound,
            source => Error::Store {
                operation: self,
                source,
            },
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("Location not found")]
    NotFound,
    #[error("{operation}: {source}")]
    Store {
        operation: Operation,
        #[source]
        source: libtowns::Error,
    },
    #[error("{operation}: the store did not respond in time")]
    Timeout { operation: Operation },
    #[error("{operation}: '{id}' is not a valid location id")]
    InvalidId { operation: Operation, id: String },
    #[error("The provided request body was rejected: {0}")]
    UnprocessableEntityJsonRejection(#[from] JsonRejection),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Store { operation, .. }
            | Error::Timeout { operation }
            | Error::InvalidId { operation, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, operation.to_string())
            }
            Error::UnprocessableEntityJsonRejection(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The request body was not in the expected format. The request could not be processed.".to_string(),
            ),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.to_client_status();
        if status.is_server_error() {
            // full details stay in the server log
            error!("Got error for response: {self:?}");
        } else {
            debug!("Got error for response: {self}");
        }
        (status, Json(Envelope::<Location>::error(message))).into_response()
    }
}
