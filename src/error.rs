use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to the external data source.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("snapshot has no squad picks for team {team}")]
    MissingPicks { team: u32 },

    #[error("snapshot has no history for team {team}")]
    MissingHistory { team: u32 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Whether this error came from the external data source rather than
    /// from bad input or a broken data contract.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_are_classified() {
        let err: Error = UpstreamError::Status {
            url: "https://example.test/api".into(),
            status: 503,
        }
        .into();
        assert!(err.is_upstream());
        assert_eq!(err.to_string(), "https://example.test/api returned status 503");
    }

    #[test]
    fn domain_errors_are_not_upstream() {
        let err: Error = DomainError::UnknownPosition { code: 9 }.into();
        assert!(!err.is_upstream());
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::InvalidValue {
            field: "budget",
            reason: "must be positive".into(),
        };
        assert_eq!(err.to_string(), "invalid value for budget: must be positive");
    }
}
