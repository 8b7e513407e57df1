//! Application configuration loading and validation.
//!
//! Configuration is a TOML file where every section is optional. A missing
//! section takes its defaults, so an empty file is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::adapter::SourceConfig;
use crate::domain::solver::SolverConfig;
use crate::domain::ScoringConfig;
use crate::error::{ConfigError, Result};
use crate::optimizer::chip::ChipConfig;
use crate::optimizer::{CaptainConfig, SquadConfig, TransferConfig};

mod logging;

pub use logging::LoggingConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gaffer.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub squad: SquadConfig,
    #[serde(default)]
    pub transfers: TransferConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub captain: CaptainConfig,
    #[serde(default)]
    pub chips: ChipConfig,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Load `path` when given. Otherwise read [`DEFAULT_CONFIG_FILE`] if it
    /// exists, else fall back to defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "source.base_url",
            }
            .into());
        }
        Url::parse(&self.source.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "source.base_url",
            reason: e.to_string(),
        })?;
        if self.source.timeout_secs == 0 {
            return Err(invalid("source.timeout_secs", "must be positive"));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid(
                "logging.format",
                format!("expected pretty or json, got {:?}", self.logging.format),
            ));
        }

        let limit = self.solver.time_limit_secs;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(invalid("solver.time_limit_secs", "must be positive"));
        }

        if self.squad.budget <= 0 {
            return Err(invalid("squad.budget", "must be positive"));
        }
        if self.squad.horizon == 0 {
            return Err(invalid("squad.horizon", "must be at least 1"));
        }

        if self.transfers.horizon == 0 {
            return Err(invalid("transfers.horizon", "must be at least 1"));
        }
        if self.transfers.penalty_per_transfer < 0.0 {
            return Err(invalid("transfers.penalty_per_transfer", "must not be negative"));
        }

        if self.captain.horizon == 0 {
            return Err(invalid("captain.horizon", "must be at least 1"));
        }
        if self.chips.wildcard.horizon == 0 {
            return Err(invalid("chips.wildcard.horizon", "must be at least 1"));
        }

        let weights = &self.scoring;
        if [weights.form_weight, weights.season_weight, weights.estimate_weight]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err(invalid("scoring", "weights must not be negative"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
