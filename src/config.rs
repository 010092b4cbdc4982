//! Runtime configuration
//!
//! Values come from command-line flags first, then `LEADCMD_*` environment
//! variables, then built-in defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Creator;

// Environment variable names
const ENV_DATA: &str = "LEADCMD_DATA";
const ENV_LATENCY_MS: &str = "LEADCMD_LATENCY_MS";
const ENV_EXPORT_DIR: &str = "LEADCMD_EXPORT_DIR";
const ENV_USER: &str = "LEADCMD_USER";

pub const DEFAULT_LATENCY_MS: u64 = 800;
pub const DEFAULT_USER_NAME: &str = "Admin User";
pub const DEFAULT_USER_ID: &str = "user1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON workspace to load instead of the built-in demo data.
    pub data_path: Option<PathBuf>,
    /// Simulated fetch delay applied when loading leads.
    pub latency: Duration,
    pub export_dir: PathBuf,
    pub user: Creator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            export_dir: default_export_dir(),
            user: Creator::new(DEFAULT_USER_ID, DEFAULT_USER_NAME),
        }
    }
}

/// Flag values that override the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_path: Option<PathBuf>,
    pub latency_ms: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn load(overrides: Overrides) -> Self {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Resolve configuration with an injectable variable lookup.
    pub fn resolve<F>(overrides: Overrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = overrides
            .data_path
            .or_else(|| non_empty(ENV_DATA).map(PathBuf::from));

        let latency_ms = overrides.latency_ms.or_else(|| {
            non_empty(ENV_LATENCY_MS).and_then(|v| match v.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(_) => {
                    tracing::warn!(value = %v, "ignoring invalid {}", ENV_LATENCY_MS);
                    None
                }
            })
        });

        let export_dir = overrides
            .export_dir
            .or_else(|| non_empty(ENV_EXPORT_DIR).map(PathBuf::from))
            .unwrap_or(defaults.export_dir);

        let user = non_empty(ENV_USER)
            .map(|name| Creator::new(DEFAULT_USER_ID, name.trim()))
            .unwrap_or(defaults.user);

        Self {
            data_path,
            latency: latency_ms.map(Duration::from_millis).unwrap_or(defaults.latency),
            export_dir,
            user,
        }
    }
}

/// Downloads folder when the platform has one, else the working directory.
fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
