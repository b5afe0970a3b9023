use crate::{error::Error, state::AppState};
use axum::{Router, extract::FromRequest};

mod location;
#[cfg(test)]
mod tests;

pub(crate) const API_PREFIX: &str = "/api";

/// A json request body whose rejections are reported with the api's error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub(crate) struct JsonBody<T>(pub(crate) T);

pub(crate) fn router() -> Router<AppState> {
    Router::new().nest("/locations", location::router())
}
