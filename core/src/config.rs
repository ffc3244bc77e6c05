//! Client configuration.
//!
//! Values come from code, from any serde source (a TOML or JSON file the host
//! application already loads), or from the environment via `from_env`.

use serde::Deserialize;

use crate::error::{CmaError, CmaResult};

pub const DEFAULT_ENDPOINT: &str = "https://api.contentful.com";

const ENV_TOKEN: &str = "CONTENTFUL_MANAGEMENT_TOKEN";
const ENV_ENDPOINT: &str = "CONTENTFUL_MANAGEMENT_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    pub access_token: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Worker threads serving callback-mode calls.
    #[serde(default = "default_callback_workers")]
    pub callback_workers: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!("cma-rust/{}", env!("CARGO_PKG_VERSION"))
}

fn default_callback_workers() -> usize {
    2
}

impl ClientConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            callback_workers: default_callback_workers(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_callback_workers(mut self, workers: usize) -> Self {
        self.callback_workers = workers;
        self
    }

    /// Read `CONTENTFUL_MANAGEMENT_TOKEN` and, optionally,
    /// `CONTENTFUL_MANAGEMENT_ENDPOINT`.
    pub fn from_env() -> CmaResult<Self> {
        let token = std::env::var(ENV_TOKEN)
            .map_err(|_| CmaError::Config(format!("{ENV_TOKEN} is not set")))?;
        let mut config = Self::new(token);
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CmaResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(CmaError::Config("access token is empty".to_string()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(CmaError::Config(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.callback_workers == 0 {
            return Err(CmaError::Config("callback_workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
