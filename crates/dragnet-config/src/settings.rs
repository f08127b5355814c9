//! Configuration file schema and loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration. Every section falls back to its default when
/// absent, so any subset of the file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DragnetConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Column type declarations for the query compiler.
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl DragnetConfig {
    /// Loads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads the file when a path is given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1` or `0.0.0.0`.
    pub bind_address: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Whether to answer cross-origin requests permissively.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Database connection settings. A full `url` wins over the discrete
/// fields when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Complete connection string, e.g. `host=db user=ro dbname=inv`.
    pub url: Option<String>,
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Password, omitted from the composed string when empty.
    pub password: String,
    /// Database name.
    pub dbname: String,
    /// TLS mode keyword passed through to the driver.
    pub sslmode: String,
}

impl DatabaseConfig {
    /// The connection string handed to the driver.
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let mut parts = vec![
            format!("host={}", self.host),
            format!("port={}", self.port),
            format!("user={}", self.user),
        ];
        if !self.password.is_empty() {
            parts.push(format!("password={}", self.password));
        }
        parts.push(format!("dbname={}", self.dbname));
        parts.push(format!("sslmode={}", self.sslmode));
        parts.join(" ")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
            sslmode: "disable".to_string(),
        }
    }
}

/// Column type declarations, keyed by dotted path or bare column name.
/// Values are semantic type names; the binary validates them against the
/// compiler's known set at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaConfig {
    /// Map of column path to type name, e.g. `ip = "network"`.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}
