use anyhow::{Context, Result, anyhow};
use libtowns::database::PoolOptions;
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, path::Path, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListenConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT: u64 = 30;

fn default_listen() -> ListenConfig {
    ListenConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_HTTP_PORT,
    }
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT
}

// This handles the case where the `listen` block is PRESENT, but a field may be missing.
fn deserialize_listen_with_default_port<'de, D>(deserializer: D) -> Result<ListenConfig, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct PartialListenConfig {
        host: Option<String>,
        port: Option<u16>,
    }

    let partial_config = PartialListenConfig::deserialize(deserializer)?;

    Ok(ListenConfig {
        host: partial_config
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: partial_config.port.unwrap_or(DEFAULT_HTTP_PORT),
    })
}

/// Settings for the database connection pool. Timeouts are in seconds.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct PoolConfig {
    #[serde(default = "default_max_connections")]
    pub(crate) max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub(crate) acquire_timeout: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl From<&PoolConfig> for PoolOptions {
    fn from(value: &PoolConfig) -> Self {
        PoolOptions {
            max_connections: value.max_connections,
            acquire_timeout: Duration::from_secs(value.acquire_timeout),
        }
    }
}

/// The configuration for a single named environment (e.g. `dev` or `prod`)
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    #[serde(default = "default_listen")]
    #[serde(deserialize_with = "deserialize_listen_with_default_port")]
    pub(crate) listen: ListenConfig,
    pub(crate) database: String,
    /// Maximum time in seconds to spend on a single request
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: u64,
    #[serde(default)]
    pub(crate) pool: PoolConfig,
}

impl EnvConfig {
    /// A configuration with default settings for everything except the database
    pub(crate) fn new(database: String) -> Self {
        Self {
            listen: default_listen(),
            database,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pool: PoolConfig::default(),
        }
    }

    /// Parse a yaml document that maps environment names to configurations and
    /// return the configuration for `envname`
    pub(crate) fn parse(contents: &str, envname: &str) -> Result<Self> {
        let mut configs: HashMap<String, EnvConfig> =
            serde_yaml::from_str(contents).with_context(|| "Couldn't parse yaml config")?;
        configs
            .remove(envname)
            .ok_or_else(|| anyhow!("No configuration found for environment '{envname}'"))
    }

    pub(crate) async fn load_from_file<P: AsRef<Path>>(path: P, envname: &str) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, envname, "Loading environment config");
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&contents, envname)
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"dev:
  database: dev-database.sqlite
  listen: &LISTEN
    host: "127.0.0.1"
    port: 8080
prod:
  database: sqlite:///var/lib/towns/towns.sqlite
  listen: *LISTEN
  request_timeout: 10
  pool:
    max_connections: 4
    acquire_timeout: 5"#;
        assert_eq!(
            EnvConfig::parse(yaml, "dev").expect("Failed to parse yaml"),
            EnvConfig {
                listen: ListenConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
                database: "dev-database.sqlite".to_string(),
                request_timeout: 30,
                pool: PoolConfig {
                    max_connections: 10,
                    acquire_timeout: 30,
                },
            }
        );
        let prod = EnvConfig::parse(yaml, "prod").expect("Failed to parse yaml");
        assert_eq!(prod.database, "sqlite:///var/lib/towns/towns.sqlite");
        assert_eq!(prod.request_timeout(), Duration::from_secs(10));
        assert_eq!(
            PoolOptions::from(&prod.pool),
            PoolOptions {
                max_connections: 4,
                acquire_timeout: Duration::from_secs(5),
            }
        );
        assert!(EnvConfig::parse(yaml, "staging").is_err());
    }

    #[test]
    fn test_default_ports() {
        let yaml = r#"dev:
  database: dev-database.sqlite
  listen:
    host: "0.0.0.0""#;
        let config = EnvConfig::parse(yaml, "dev").expect("Failed to parse yaml");
        assert_eq!(config.listen.port, 5000);

        let yaml = r#"dev:
  database: dev-database.sqlite"#;
        let config = EnvConfig::parse(yaml, "dev").expect("Failed to parse yaml");
        assert_eq!(config.listen, default_listen());
    }

    #[test]
    fn test_unknown_fields() {
        let yaml = r#"dev:
  database: dev-database.sqlite
  mail_service: foo"#;
        assert!(EnvConfig::parse(yaml, "dev").is_err());
    }
}
