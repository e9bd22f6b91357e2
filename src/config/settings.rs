use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ssh::policy::{PolicyKind, TrustPolicy};

use super::paths;

/// Application-wide settings stored in config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub host_keys: HostKeyConfig,
}

impl AppConfig {
    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        match paths::config_file() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Global host key policy plus per-target overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HostKeyConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    /// Explicit known_hosts files. Empty means the default locations.
    #[serde(default)]
    pub known_hosts_files: Vec<String>,
    #[serde(default)]
    pub overrides: Vec<HostKeyOverride>,
}

/// Policy for one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostKeyOverride {
    pub host: String,
    /// Any port when omitted
    #[serde(default)]
    pub port: Option<u16>,
    pub policy: PolicyKind,
    /// Replaces the global file list for this target
    #[serde(default)]
    pub known_hosts_files: Option<Vec<String>>,
}

impl HostKeyOverride {
    fn applies_to(&self, host: &str, port: u16) -> bool {
        self.host == host && self.port.is_none_or(|p| p == port)
    }
}

impl HostKeyConfig {
    /// Resolve the policy for one connection. The first matching override wins.
    pub fn resolve(&self, host: &str, port: u16) -> TrustPolicy {
        let target = self.overrides.iter().find(|o| o.applies_to(host, port));

        let kind = target.map_or(self.policy, |o| o.policy);
        match kind {
            PolicyKind::AllowAny => {
                tracing::debug!("Host key checking disabled for {}:{} by config", host, port);
                TrustPolicy::AllowAny
            }
            PolicyKind::Verify => {
                let files = target
                    .and_then(|o| o.known_hosts_files.as_ref())
                    .unwrap_or(&self.known_hosts_files);
                TrustPolicy::Verify(Self::known_hosts_paths(files))
            }
        }
    }

    fn known_hosts_paths(files: &[String]) -> Vec<PathBuf> {
        if files.is_empty() {
            // Implicit defaults only count when present; explicit files must exist
            return paths::default_known_hosts_files()
                .into_iter()
                .filter(|path| path.exists())
                .collect();
        }

        let mut paths = Vec::new();
        for path in files.iter().map(|f| paths::expand_tilde(f)) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}
