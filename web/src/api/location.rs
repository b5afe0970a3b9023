use super::JsonBody;
use crate::{
    error::{Error, Operation},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use libtowns::{Envelope, Location, LocationInput};
use tracing::{debug, warn};

pub(crate) const DELETED_MESSAGE: &str = "Location deleted successfully";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(add_location))
        .route(
            "/{id}",
            get(show_location)
                .put(modify_location)
                .delete(delete_location),
        )
}

/// Run a single store call for `operation`, giving up once the configured
/// request timeout has passed
async fn run<T, F>(state: &AppState, operation: Operation, call: F) -> Result<T, Error>
where
    F: Future<Output = libtowns::Result<T>>,
{
    match tokio::time::timeout(state.config.request_timeout(), call).await {
        Ok(result) => result.map_err(|e| operation.fail(e)),
        Err(_) => {
            warn!(%operation, "store call timed out");
            Err(Error::Timeout { operation })
        }
    }
}

// ids arrive as raw path segments so that an unparseable id is reported like
// any other failed lookup rather than as a routing error
fn parse_id(operation: Operation, id: String) -> Result<i64, Error> {
    id.parse().map_err(|_| Error::InvalidId { operation, id })
}

async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Location>>>, Error> {
    let locations = run(&state, Operation::List, state.store.list()).await?;
    debug!("found {} locations", locations.len());
    Ok(Json(Envelope::success(locations)))
}

async fn show_location(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Location>>, Error> {
    let id = parse_id(Operation::Get, id)?;
    let location = run(&state, Operation::Get, state.store.get(id)).await?;
    Ok(Json(Envelope::success(location)))
}

async fn add_location(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LocationInput>,
) -> Result<impl IntoResponse, Error> {
    let location = run(&state, Operation::Create, state.store.create(&input)).await?;
    debug!(id = location.id, "created location");
    Ok((StatusCode::CREATED, Json(Envelope::success(location))))
}

async fn modify_location(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LocationInput>,
) -> Result<Json<Envelope<Location>>, Error> {
    let id = parse_id(Operation::Update, id)?;
    let location = run(&state, Operation::Update, state.store.update(id, &input)).await?;
    Ok(Json(Envelope::success(location)))
}

async fn delete_location(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Envelope<Location>>, Error> {
    let id = parse_id(Operation::Delete, id)?;
    let location = run(&state, Operation::Delete, state.store.delete(id)).await?;
    debug!(id, name = %location.name, "deleted location");
    Ok(Json(Envelope::message(DELETED_MESSAGE)))
}
