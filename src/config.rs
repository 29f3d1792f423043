//! Configuration loaded from a YAML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classifier::BrowserClassifier;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Rule file replacing the built-in browser rules.
    #[serde(default)]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Measurement id of the analytics property.
    #[serde(default)]
    pub tracking_id: String,

    /// Idle time after which a new session id is issued.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Oldest events are evicted beyond this many.
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,

    /// Log sent events and transport failures.
    #[serde(default)]
    pub debug: bool,
}

fn default_session_timeout_secs() -> u64 {
    30 * 60
}

fn default_max_queue_size() -> usize {
    100
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tracking_id: String::new(),
            session_timeout_secs: default_session_timeout_secs(),
            max_queue_size: default_max_queue_size(),
            debug: false,
        }
    }
}

impl AnalyticsConfig {
    pub fn session_timeout_ms(&self) -> u64 {
        self.session_timeout_secs.saturating_mul(1000)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tracking_id.trim().is_empty() {
            return Err(Error::Config("analytics.tracking_id is required".into()));
        }
        if self.max_queue_size == 0 {
            return Err(Error::Config(
                "analytics.max_queue_size must be greater than 0".into(),
            ));
        }
        if self.session_timeout_secs == 0 {
            return Err(Error::Config(
                "analytics.session_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load and validate a config file.  A relative `rules` path is resolved
    /// against the config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;
        if let (Some(rules), Some(dir)) = (config.rules.as_mut(), path.parent()) {
            if rules.is_relative() {
                *rules = dir.join(&*rules);
            }
        }
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.analytics.validate()
    }

    /// Classifier for this config: the rule file override, or the built-in
    /// rules.
    pub fn classifier(&self) -> Result<BrowserClassifier> {
        match &self.rules {
            Some(path) => BrowserClassifier::from_file(path),
            None => {
                log::debug!("using built-in browser rules");
                BrowserClassifier::builtin()
            }
        }
    }
}
