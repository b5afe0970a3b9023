//! HTTP client for the locations api
use libtowns::{Envelope, Location, LocationInput};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Location not found")]
    NotFound,

    #[error("The server returned an error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("The server response did not contain any data")]
    MissingData,

    #[error("Unable to understand the server response ({status})")]
    InvalidResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to reach the server")]
    Transport(#[from] reqwest::Error),
}

/// A connection to the api that manages the location directory. Every call
/// unwraps the response envelope and reports a failure as a [ClientError].
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocationClient {
    /// `base_url` is the url that the api is mounted at, e.g.
    /// `http://localhost:5000/api`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/locations/{id}", self.base_url),
            None => format!("{}/locations", self.base_url),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        id: Option<i64>,
        body: Option<&LocationInput>,
    ) -> Result<Envelope<T>, ClientError> {
        let url = self.url(id);
        debug!(%method, %url, "Sending request");
        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = req.send().await.inspect_err(|e| {
            warn!(%method, %url, error = %e, "Request failed");
        })?;
        unwrap_envelope(res).await
    }

    pub async fn get_locations(&self) -> Result<Vec<Location>, ClientError> {
        data(self.send(Method::GET, None, None).await?)
    }

    pub async fn get_location(&self, id: i64) -> Result<Location, ClientError> {
        data(self.send(Method::GET, Some(id), None).await?)
    }

    pub async fn create_location(&self, input: &LocationInput) -> Result<Location, ClientError> {
        data(self.send(Method::POST, None, Some(input)).await?)
    }

    /// Replace all of the editable fields of a location
    pub async fn update_location(
        &self,
        id: i64,
        input: &LocationInput,
    ) -> Result<Location, ClientError> {
        data(self.send(Method::PUT, Some(id), Some(input)).await?)
    }

    /// Delete a location and return the confirmation message from the server
    pub async fn delete_location(&self, id: i64) -> Result<String, ClientError> {
        match self.send::<serde_json::Value>(Method::DELETE, Some(id), None).await? {
            Envelope::Success { message, .. } => Ok(message.unwrap_or_default()),
            Envelope::Error { message } => Err(ClientError::Api {
                status: StatusCode::OK.as_u16(),
                message,
            }),
        }
    }
}

async fn unwrap_envelope<T: DeserializeOwned>(res: Response) -> Result<Envelope<T>, ClientError> {
    let status = res.status();
    let bytes = res.bytes().await?;
    let envelope = serde_json::from_slice::<Envelope<T>>(&bytes);
    match (status, envelope) {
        // only the api itself reports a missing location, anything else is a
        // wrong url
        (StatusCode::NOT_FOUND, Ok(Envelope::Error { .. })) => Err(ClientError::NotFound),
        (s @ StatusCode::NOT_FOUND, _) => Err(ClientError::Api {
            status: s.as_u16(),
            message: s.canonical_reason().unwrap_or("Not Found").to_string(),
        }),
        (s, Ok(Envelope::Error { message })) => Err(ClientError::Api {
            status: s.as_u16(),
            message,
        }),
        (s, Ok(envelope)) if s.is_success() => Ok(envelope),
        (s, Ok(_)) => Err(ClientError::Api {
            status: s.as_u16(),
            message: s.canonical_reason().unwrap_or("Unknown error").to_string(),
        }),
        (s, Err(source)) => Err(ClientError::InvalidResponse {
            status: s.as_u16(),
            source,
        }),
    }
}

fn data<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    match envelope {
        Envelope::Success {
            data: Some(data), ..
        } => Ok(data),
        Envelope::Success { data: None, .. } => Err(ClientError::MissingData),
        Envelope::Error { message } => Err(ClientError::Api {
            status: StatusCode::OK.as_u16(),
            message,
        }),
    }
}
