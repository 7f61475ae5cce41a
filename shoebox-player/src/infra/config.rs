use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shoebox_model::{ConnectionClass, EffectiveType};
use thiserror::Error;

use crate::domains::preload::{PolicyTable, PreloadSettings};
use crate::infra::constants::{http, preload};
use crate::infra::network::NetworkSnapshot;

const APP_DIR: &str = "shoebox-player";
const CONFIG_FILE: &str = "config.json";

pub const ENV_IMAGE_CACHE_CAPACITY: &str = "SHOEBOX_IMAGE_CACHE_CAPACITY";
pub const ENV_VIDEO_CACHE_CAPACITY: &str = "SHOEBOX_VIDEO_CACHE_CAPACITY";
pub const ENV_EFFECTIVE_TYPE: &str = "SHOEBOX_EFFECTIVE_TYPE";
pub const ENV_SAVE_DATA: &str = "SHOEBOX_SAVE_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preload: PreloadConfig,
    pub network: NetworkConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    pub image_cache_capacity: usize,
    pub video_cache_capacity: usize,
    pub video_registry_max: usize,
    pub look_behind: usize,
    pub policies: PolicyTable,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            image_cache_capacity: preload::capacity::IMAGE_CACHE_CAPACITY,
            video_cache_capacity: preload::capacity::VIDEO_CACHE_CAPACITY,
            video_registry_max: preload::capacity::VIDEO_REGISTRY_MAX,
            look_behind: preload::LOOK_BEHIND,
            policies: PolicyTable::default(),
        }
    }
}

/// Seed values for the network signal source, for hosts without a live
/// connection listener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub effective_type: Option<EffectiveType>,
    pub save_data: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub video_metadata_bytes: u64,
    pub video_auto_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::REQUEST_TIMEOUT.as_secs(),
            pool_max_idle_per_host: http::POOL_MAX_IDLE_PER_HOST,
            video_metadata_bytes: http::VIDEO_METADATA_BYTES,
            video_auto_bytes: http::VIDEO_AUTO_BYTES,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, then apply environment overrides.
    ///
    /// Never fails: an unreadable or malformed file falls back to defaults
    /// with a warning.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("{}; using default configuration", err);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Apply `SHOEBOX_*` overrides read through `lookup`. Unparseable values
    /// are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = parse_var(&lookup, ENV_IMAGE_CACHE_CAPACITY) {
            self.preload.image_cache_capacity = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_VIDEO_CACHE_CAPACITY) {
            self.preload.video_cache_capacity = value;
            self.preload.video_registry_max = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_EFFECTIVE_TYPE) {
            self.network.effective_type = Some(value);
        }
        if let Some(value) = parse_var(&lookup, ENV_SAVE_DATA) {
            self.network.save_data = Some(value);
        }
    }

    /// Check the preload section and turn it into preloader settings.
    pub fn validate(&self) -> Result<PreloadSettings, ConfigError> {
        let preload = &self.preload;
        let non_zero = |name: &str, value: usize| {
            NonZeroUsize::new(value).ok_or_else(|| {
                ConfigError::Invalid(format!("{name} must be at least 1"))
            })
        };

        let settings = PreloadSettings {
            image_cache_capacity: non_zero(
                "image_cache_capacity",
                preload.image_cache_capacity,
            )?,
            video_cache_capacity: non_zero(
                "video_cache_capacity",
                preload.video_cache_capacity,
            )?,
            video_registry_max: non_zero(
                "video_registry_max",
                preload.video_registry_max,
            )?,
            look_behind: preload.look_behind,
            policies: preload.policies,
        };

        if preload.policies.slow.video.is_some() {
            return Err(ConfigError::Invalid(
                "video prefetch cannot be enabled for slow connections".into(),
            ));
        }
        for class in ConnectionClass::ALL {
            if preload.policies.for_class(class).image_width == 0 {
                return Err(ConfigError::Invalid(format!(
                    "image_width for {class} connections must be non-zero"
                )));
            }
        }
        if preload.video_registry_max != preload.video_cache_capacity {
            log::warn!(
                "video_registry_max ({}) differs from video_cache_capacity ({}); \
                 the registry and video cache will drift apart",
                preload.video_registry_max,
                preload.video_cache_capacity
            );
        }

        Ok(settings)
    }

    pub fn network_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            effective_type: self.network.effective_type,
            save_data: self.network.save_data,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
