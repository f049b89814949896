//! Settings store for the hosts-intercept crate.
//!
//! The builder talks to its configuration through the [`ConfigStore`] trait:
//! a small key-value surface with typed getters, a typed setter for the
//! refresh timestamp, and an explicit `save()`. The production implementation
//! is [`YamlConfigStore`], a YAML mapping file loaded with serde.

use crate::error::{HostsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings key for the mirror URL.
pub const MIRROR_KEY: &str = "mirror";

/// Settings key for the mirror refresh interval token.
pub const MIRROR_INTERVAL_KEY: &str = "mirror_interval";

/// Settings key for the epoch-millisecond timestamp of the last mirror fetch.
pub const LAST_MIRROR_LOAD_KEY: &str = "last_mirror_load";

/// Key-value configuration access with explicit persistence.
///
/// Mutations only take effect on disk after `save()`; the builder persists
/// the refresh timestamp this way and treats a failed save as recoverable.
pub trait ConfigStore {
    /// Returns the string value for a key, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the integer value for a key, or `default` if unset.
    fn get_i64(&self, key: &str, default: i64) -> i64;

    /// Sets an integer value for a key.
    fn set_i64(&mut self, key: &str, value: i64);

    /// Persists the current values.
    fn save(&self) -> Result<()>;
}

/// Mirror refresh interval policy.
///
/// `Always` disables caching entirely: every build pass fetches the mirror
/// and neither the cache file nor the refresh timestamp is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorInterval {
    /// Refetch on every build pass, never cache.
    Always,
    /// Refresh after 12 hours.
    TwelveHours,
    /// Refresh after 24 hours.
    OneDay,
    /// Refresh after 48 hours.
    TwoDays,
    /// Refresh after 72 hours.
    ThreeDays,
}

impl MirrorInterval {
    /// Maps a settings token to an interval.
    ///
    /// Unrecognized or missing tokens fall back to the 12-hour default.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("interval_1") => Self::Always,
            Some("interval_3") => Self::OneDay,
            Some("interval_4") => Self::TwoDays,
            Some("interval_5") => Self::ThreeDays,
            _ => Self::TwelveHours,
        }
    }

    /// The interval length in milliseconds.
    pub fn as_millis(&self) -> i64 {
        match self {
            Self::Always => 0,
            Self::TwelveHours => Duration::from_secs(12 * 60 * 60).as_millis() as i64,
            Self::OneDay => Duration::from_secs(24 * 60 * 60).as_millis() as i64,
            Self::TwoDays => Duration::from_secs(2 * 24 * 60 * 60).as_millis() as i64,
            Self::ThreeDays => Duration::from_secs(3 * 24 * 60 * 60).as_millis() as i64,
        }
    }
}

/// On-disk settings, one YAML mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Mirror URL; absent or blank disables the mirror source.
    pub mirror: Option<String>,

    /// Refresh interval token (`interval_1` .. `interval_5`).
    pub mirror_interval: Option<String>,

    /// Epoch milliseconds of the last successful mirror fetch.
    pub last_mirror_load: i64,
}

/// File-backed [`ConfigStore`] over a YAML settings file.
pub struct YamlConfigStore {
    path: PathBuf,
    settings: Settings,
}

impl YamlConfigStore {
    /// Loads the store from `path`.
    ///
    /// A missing file yields default settings; a file that exists but does
    /// not parse is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let settings = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_yaml::from_str(&contents)
                .map_err(|e| HostsError::settings(path.display().to_string(), e.to_string()))?
        } else {
            Settings::default()
        };

        Ok(Self { path, settings })
    }

    /// Creates an in-memory store around existing settings, persisted to `path`.
    pub fn with_settings<P: AsRef<Path>>(path: P, settings: Settings) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            settings,
        }
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl ConfigStore for YamlConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            MIRROR_KEY => self.settings.mirror.clone(),
            MIRROR_INTERVAL_KEY => self.settings.mirror_interval.clone(),
            LAST_MIRROR_LOAD_KEY => Some(self.settings.last_mirror_load.to_string()),
            _ => None,
        }
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        match key {
            LAST_MIRROR_LOAD_KEY => self.settings.last_mirror_load,
            _ => self
                .get(key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default),
        }
    }

    fn set_i64(&mut self, key: &str, value: i64) {
        if key == LAST_MIRROR_LOAD_KEY {
            self.settings.last_mirror_load = value;
        }
    }

    fn save(&self) -> Result<()> {
        let contents = serde_yaml::to_string(&self.settings)
            .map_err(|e| HostsError::settings(self.path.display().to_string(), e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
