use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::errors::{CertdeckError, Result};

/// Fallback server URL, matching the backend's default bind.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:18080";

/// Default per-request timeout. Kept well under the 10-second poll
/// interval so a hung fetch settles before the next tick is due.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".certdeck/config.toml";

/// Optional configuration read from `.certdeck/config.toml`.
///
/// A missing file is not an error; every field has a default. A file
/// that exists but fails to parse is an error: a silently-ignored typo
/// would point every command at the wrong server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    /// Base URL of the certificate backend.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load the configuration from the given path, or defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CertdeckError::InvalidConfig {
            detail: format!("failed to parse {}: {e}", path.display()),
        })
    }

    /// Resolve the server base URL: CLI flag (or env, which clap folds
    /// into the flag) wins, then the config file, then the default.
    pub fn resolve_server_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.server.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Resolve the request timeout with the same precedence.
    pub fn resolve_timeout(&self, flag: Option<u64>) -> Duration {
        Duration::from_secs(
            flag.or(self.server.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}
