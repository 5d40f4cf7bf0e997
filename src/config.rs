//! Runtime Configuration Module
//!
//! Resolves environment-dependent values (API base URL, map key).
//! A configuration document injected at deploy time wins over values
//! embedded at build time.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Placeholder written into unconfigured deployments for the map key
pub const AMAP_KEY_PLACEHOLDER: &str = "PLACEHOLDER_VITE_AMAP_KEY";

/// Placeholder written into unconfigured deployments for the API base URL
pub const API_BASE_URL_PLACEHOLDER: &str = "PLACEHOLDER_VITE_API_BASE_URL";

/// Local development backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Env var naming the runtime configuration document
pub const CONFIG_PATH_ENV: &str = "TRIP_PLANNER_APP_CONFIG";

const CONFIG_FILE_NAME: &str = "app-config.json";

/// Configuration document injected by the host at deploy time
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    #[serde(rename = "VITE_AMAP_KEY", default)]
    pub amap_key: Option<String>,
    #[serde(rename = "VITE_API_BASE_URL", default)]
    pub api_base_url: Option<String>,
}

impl RuntimeConfig {
    /// Parse a runtime configuration document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a runtime configuration document from disk
    ///
    /// A missing or malformed file is treated as "no runtime config".
    pub fn load(path: &Path) -> Option<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No runtime config at {:?}: {}", path, e);
                return None;
            }
        };

        match Self::from_json(&contents) {
            Ok(config) => {
                debug!("Loaded runtime config from {:?}", path);
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring malformed runtime config {:?}: {}", path, e);
                None
            }
        }
    }

    /// Locate the injected document: the env override first, then the
    /// platform config directory.
    pub fn discover() -> Option<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&path));
        }

        let path = default_config_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            None
        }
    }
}

/// Values baked into the binary at compile time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub amap_key: Option<String>,
    pub api_base_url: Option<String>,
}

impl BuildConfig {
    /// Values captured from the build environment
    pub fn embedded() -> Self {
        Self {
            amap_key: option_env!("VITE_AMAP_KEY").map(str::to_string),
            api_base_url: option_env!("VITE_API_BASE_URL").map(str::to_string),
        }
    }
}

/// Two-tier configuration lookup
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    runtime: Option<RuntimeConfig>,
    build: BuildConfig,
}

impl ConfigResolver {
    pub fn new(runtime: Option<RuntimeConfig>, build: BuildConfig) -> Self {
        Self { runtime, build }
    }

    /// Resolver for the running process: discovered runtime document over
    /// embedded build values
    pub fn from_environment() -> Self {
        Self::new(RuntimeConfig::discover(), BuildConfig::embedded())
    }

    /// Map service key; empty means the map feature is disabled
    pub fn amap_key(&self) -> String {
        let runtime = self.runtime.as_ref().and_then(|c| c.amap_key.as_deref());
        resolve(runtime, AMAP_KEY_PLACEHOLDER, self.build.amap_key.as_deref(), "")
    }

    /// Backend base URL
    pub fn api_base_url(&self) -> String {
        let runtime = self.runtime.as_ref().and_then(|c| c.api_base_url.as_deref());
        resolve(
            runtime,
            API_BASE_URL_PLACEHOLDER,
            self.build.api_base_url.as_deref(),
            DEFAULT_API_BASE_URL,
        )
    }

    pub fn map_enabled(&self) -> bool {
        !self.amap_key().is_empty()
    }
}

fn resolve(runtime: Option<&str>, placeholder: &str, build: Option<&str>, default: &str) -> String {
    match runtime {
        Some(value) if !value.is_empty() && value != placeholder => value.to_string(),
        _ => build
            .filter(|value| !value.is_empty())
            .unwrap_or(default)
            .to_string(),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("TripPlanner").join(CONFIG_FILE_NAME))
}
