use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::{
    fs::{File, create_dir_all, read_to_string, set_permissions},
    io::AsyncWriteExt,
};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: u64 = 30;

fn serialize_token<S: Serializer>(token: &Option<SecretString>, s: S) -> Result<S::Ok, S::Error> {
    match token {
        Some(token) => s.serialize_some(token.expose_secret()),
        None => s.serialize_none(),
    }
}

/// Client settings that are stored between invocations. Anything that isn't
/// set falls back to a default value.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    /// request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default, serialize_with = "serialize_token")]
    pub map_token: Option<SecretString>,
}

/// The location of the config file for the current user
pub fn config_file() -> Result<PathBuf> {
    ProjectDirs::from("org", "outdoortowns", "townsctl")
        .map(|dirs| dirs.config_dir().join("config.json"))
        .ok_or_else(|| anyhow!("Unable to determine the config directory"))
}

impl Config {
    fn parse(contents: String) -> Result<Self> {
        serde_json::from_str(&contents).with_context(|| "Couldn't parse json string")
    }

    fn format(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Couldn't convert config to json")
    }

    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        debug!(?p, "Trying to load config");
        let contents = read_to_string(path).await?;
        Self::parse(contents)
    }

    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(?path, "Saving config");
        if let Some(dir) = path.parent() {
            create_dir_all(dir).await?;
        }
        let mut file = File::create(path).await?;
        let serialized = self.format()?;
        // the file may contain an access token
        let mut perms = file.metadata().await?.permissions();
        perms.set_mode(0o600);
        set_permissions(path, perms).await?;
        file.write_all(serialized.as_bytes())
            .await
            .with_context(|| "Failed to write config file")?;
        file.flush().await?;
        Ok(())
    }

    /// Replace stored values with any values that were given explicitly
    pub fn override_with(
        mut self,
        api_url: Option<String>,
        timeout: Option<u64>,
        map_token: Option<String>,
    ) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if timeout.is_some() {
            self.timeout = timeout;
        }
        if let Some(token) = map_token {
            self.map_token = Some(token.into());
        }
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn map_token(&self) -> Option<&SecretString> {
        self.map_token.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url(), DEFAULT_API_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert!(cfg.map_token().is_none());
    }

    #[test]
    fn test_override() {
        let cfg = Config::parse(r#"{"api_url": "http://towns.example.com/api", "timeout": 5}"#.into())
            .expect("failed to parse");
        let cfg = cfg.override_with(None, Some(12), Some("pk.abc".to_string()));
        assert_eq!(cfg.api_url(), "http://towns.example.com/api");
        assert_eq!(cfg.timeout(), Duration::from_secs(12));
        assert_eq!(cfg.map_token().map(|t| t.expose_secret()), Some("pk.abc"));
    }

    #[test(tokio::test)]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let cfg = Config::default().override_with(
            Some("http://127.0.0.1:5000/api".to_string()),
            None,
            Some("pk.secret".to_string()),
        );
        cfg.save_to_file(&path).await.expect("failed to save");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let loaded = Config::load_from_file(&path).await.expect("failed to load");
        assert_eq!(loaded.api_url(), "http://127.0.0.1:5000/api");
        assert_eq!(loaded.timeout, None);
        assert_eq!(
            loaded.map_token().map(|t| t.expose_secret()),
            Some("pk.secret")
        );
        // the token is never printed in debug output
        assert!(!format!("{loaded:?}").contains("pk.secret"));
    }
}
