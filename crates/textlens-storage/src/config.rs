//! Environment configuration for the Cosmos DB container.

use std::env;
use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::StorageError;

pub const CONNECTION_STRING_VAR: &str = "COSMOS_CONNECTION_STRING";
pub const DATABASE_NAME_VAR: &str = "COSMOS_DATABASE_NAME";
pub const CONTAINER_NAME_VAR: &str = "COSMOS_CONTAINER_NAME";

pub const DEFAULT_DATABASE_NAME: &str = "TextAnalyzerDB";
pub const DEFAULT_CONTAINER_NAME: &str = "AnalysisResults";

#[derive(Debug, Clone)]
pub struct CosmosConfig {
    pub connection: ConnectionString,
    pub database: String,
    pub container: String,
}

impl CosmosConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let setting = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let connection = setting(CONNECTION_STRING_VAR)
            .ok_or(StorageError::MissingSetting {
                name: CONNECTION_STRING_VAR,
            })?
            .parse()?;

        Ok(Self {
            connection,
            database: setting(DATABASE_NAME_VAR)
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            container: setting(CONTAINER_NAME_VAR)
                .unwrap_or_else(|| DEFAULT_CONTAINER_NAME.to_string()),
        })
    }

    /// Resource link of the container, e.g. `dbs/TextAnalyzerDB/colls/AnalysisResults`.
    pub fn container_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }
}

/// A parsed `AccountEndpoint=...;AccountKey=...;` connection string.
#[derive(Clone)]
pub struct ConnectionString {
    /// Account endpoint without a trailing slash.
    pub endpoint: String,
    /// Decoded master key.
    pub key: Vec<u8>,
}

impl FromStr for ConnectionString {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut endpoint = None;
        let mut key = None;

        for segment in s.split(';').map(str::trim).filter(|seg| !seg.is_empty()) {
            let Some((name, value)) = segment.split_once('=') else {
                return Err(StorageError::InvalidConnectionString(format!(
                    "segment without '=': {segment}"
                )));
            };
            match name.trim().to_ascii_lowercase().as_str() {
                "accountendpoint" => endpoint = Some(value.trim().trim_end_matches('/').to_string()),
                "accountkey" => key = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .ok_or_else(|| StorageError::InvalidConnectionString("missing AccountEndpoint".into()))?;
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(StorageError::InvalidConnectionString(format!(
                "AccountEndpoint is not an http(s) URL: {endpoint}"
            )));
        }

        let key = key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StorageError::InvalidConnectionString("missing AccountKey".into()))?;
        let key = STANDARD.decode(key).map_err(|e| {
            StorageError::InvalidConnectionString(format!("AccountKey is not base64: {e}"))
        })?;

        Ok(Self { endpoint, key })
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .finish()
    }
}
