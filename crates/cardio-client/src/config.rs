//! Endpoint configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base URL of a predictor running on the developer machine.
pub const LOCAL_BASE_URL: &str = "http://localhost:5001";

/// Base URL of the deployed predictor.
pub const DEPLOYED_BASE_URL: &str = "https://heart-failure-prediction-backend.onrender.com";

/// Where the predictor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiEnvironment {
    /// Predictor on localhost.
    Local,
    /// Hosted predictor.
    #[default]
    Deployed,
}

impl ApiEnvironment {
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_BASE_URL,
            Self::Deployed => DEPLOYED_BASE_URL,
        }
    }

    /// Pick the environment from the host name the client is served from.
    ///
    /// `localhost` selects [`ApiEnvironment::Local`]; every other host the
    /// deployed predictor.
    #[must_use]
    pub fn from_host(host: &str) -> Self {
        if host.eq_ignore_ascii_case("localhost") {
            Self::Local
        } else {
            Self::Deployed
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Deployed => "deployed",
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved predictor endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Which known predictor to talk to.
    pub environment: ApiEnvironment,

    /// Explicit base URL; takes precedence over `environment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn for_environment(environment: ApiEnvironment) -> Self {
        Self {
            environment,
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}
