use anyhow::{Context, Result, anyhow};
use axum::{Json, Router, response::IntoResponse, routing::get};
use clap::Parser;
use config::EnvConfig;
use libtowns::Database;
use serde_json::json;
use state::{AppState, SharedState};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod config;
mod error;
mod state;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, help = "A yaml file describing one or more environments")]
    pub config: Option<PathBuf>,
    #[arg(short, long, default_value = "dev", help = "The environment to use from the config file")]
    pub env: String,
    #[arg(short, long, env = "TOWNS_DATABASE", help = "Database connection string")]
    pub database: Option<String>,
    #[arg(short, long)]
    pub listen: Option<String>,
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    async fn env_config(&self) -> Result<EnvConfig> {
        let mut env = match self.config {
            Some(ref path) => EnvConfig::load_from_file(path, &self.env).await?,
            None => EnvConfig::new(
                self.database
                    .clone()
                    .ok_or_else(|| anyhow!("No database specified, use --config or --database"))?,
            ),
        };
        if let Some(ref database) = self.database {
            env.database = database.clone();
        }
        if let Some(ref host) = self.listen {
            env.listen.host = host.clone();
        }
        if let Some(port) = self.port {
            env.listen.port = port;
        }
        Ok(env)
    }
}

pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(api::API_PREFIX, api::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
pub(crate) fn test_app(pool: sqlx::Pool<sqlx::Sqlite>) -> Router {
    app(Arc::new(SharedState::test(pool)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("TOWNS_LOG"))
        .init();
    let args = Cli::parse();
    let env = args.env_config().await?;
    debug!("using database '{}'", env.database);

    let addr: SocketAddr = format!("{}:{}", env.listen.host, env.listen.port).parse()?;
    let db = Database::open(&env.database, &(&env.pool).into())
        .await
        .with_context(|| format!("Unable to open database {}", &env.database))?;
    let app = app(Arc::new(SharedState::new(Arc::new(db.clone()), env)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}
