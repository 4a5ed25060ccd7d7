//! Store configuration.
//!
//! Read from ~/.config/agenda/config.toml, with `AGENDA_*` environment
//! variables taking precedence (e.g. `AGENDA_BULK_LATENCY_MS=0`).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};
use crate::latency::Latency;
use crate::probe::{DEFAULT_PROBE_URL, HttpProbe};
use crate::store::EventStore;

const DEFAULT_BULK_LATENCY_MS: u64 = 500;
const DEFAULT_POINT_LATENCY_MS: u64 = 300;

fn default_bulk_latency_ms() -> u64 {
    DEFAULT_BULK_LATENCY_MS
}

fn default_point_latency_ms() -> u64 {
    DEFAULT_POINT_LATENCY_MS
}

fn default_probe_url() -> String {
    DEFAULT_PROBE_URL.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgendaConfig {
    #[serde(default = "default_bulk_latency_ms")]
    pub bulk_latency_ms: u64,

    #[serde(default = "default_point_latency_ms")]
    pub point_latency_ms: u64,

    /// Send the outbound side call on every mutation.
    #[serde(default = "default_true")]
    pub probe_enabled: bool,

    #[serde(default = "default_probe_url")]
    pub probe_url: String,

    /// Start with the sample events.
    #[serde(default = "default_true")]
    pub seed: bool,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            bulk_latency_ms: DEFAULT_BULK_LATENCY_MS,
            point_latency_ms: DEFAULT_POINT_LATENCY_MS,
            probe_enabled: true,
            probe_url: default_probe_url(),
            seed: true,
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if nothing is there yet.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("AGENDA").try_parsing(true))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Simulated latency, in milliseconds:
# bulk_latency_ms = {DEFAULT_BULK_LATENCY_MS}
# point_latency_ms = {DEFAULT_POINT_LATENCY_MS}

# Outbound test call made on every create/update/delete:
# probe_enabled = true
# probe_url = \"{DEFAULT_PROBE_URL}\"

# Start with the sample events:
# seed = true
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn latency(&self) -> Latency {
        Latency {
            bulk: Duration::from_millis(self.bulk_latency_ms),
            point: Duration::from_millis(self.point_latency_ms),
        }
    }

    /// Construct a ready store from these settings.
    pub fn build_store(&self) -> AgendaResult<EventStore> {
        let store = if self.seed {
            EventStore::new(self.latency())
        } else {
            EventStore::empty(self.latency())
        };

        if !self.probe_enabled {
            return Ok(store);
        }

        let probe = HttpProbe::new(self.probe_url.clone())?;
        Ok(store.with_hook(Arc::new(probe)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgendaConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AgendaConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "bulk_latency_ms = 0\npoint_latency_ms = 10\nprobe_enabled = false\nseed = false\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();
        assert_eq!(config.bulk_latency_ms, 0);
        assert_eq!(config.point_latency_ms, 10);
        assert!(!config.probe_enabled);
        assert!(!config.seed);
        assert_eq!(config.probe_url, DEFAULT_PROBE_URL);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "bulk_latency_ms = \"soon\"\n").unwrap();

        let err = AgendaConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, AgendaError::Config(_)));
    }

    #[test]
    fn default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AgendaConfig::create_default_config(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# bulk_latency_ms = 500"));
        assert_eq!(AgendaConfig::load_from(&path).unwrap(), AgendaConfig::default());
    }

    #[test]
    fn latency_converts_milliseconds() {
        let config = AgendaConfig {
            bulk_latency_ms: 20,
            point_latency_ms: 5,
            ..Default::default()
        };
        assert_eq!(config.latency().bulk, Duration::from_millis(20));
        assert_eq!(config.latency().point, Duration::from_millis(5));
        assert_eq!(AgendaConfig::default().latency(), Latency::default());
    }

    #[tokio::test]
    async fn build_store_respects_seed_flag() {
        let config = AgendaConfig {
            bulk_latency_ms: 0,
            point_latency_ms: 0,
            probe_enabled: false,
            seed: false,
            ..Default::default()
        };
        assert!(config.build_store().unwrap().is_empty().await);

        let seeded = AgendaConfig { seed: true, ..config };
        assert_eq!(seeded.build_store().unwrap().len().await, 4);
    }
}
