use serde::Deserialize;
use std::fs::File;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("wordpress.auth_user must not be empty")]
    EmptyAuthUser,

    #[error("wordpress.auth_pass must not be empty")]
    EmptyAuthPass,
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl Listener {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }
}

/// WordPress REST API connection settings
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WordPressConfig {
    /// Base URL of the REST API (e.g., "https://example.com/wp-json/wp/v2")
    ///
    /// Note: Uses the `url::Url` type for compile-time URL validation.
    /// Invalid URLs will be rejected during config deserialization.
    pub base_url: Url,
    /// Basic auth username
    pub auth_user: String,
    /// Basic auth password. WordPress displays application passwords with
    /// spaces in them; whitespace is stripped before use.
    pub auth_pass: String,
}

impl WordPressConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_user.is_empty() {
            return Err(ConfigError::EmptyAuthUser);
        }
        if self.password().is_empty() {
            return Err(ConfigError::EmptyAuthPass);
        }
        Ok(())
    }

    /// The configured password with all whitespace removed.
    pub fn password(&self) -> String {
        self.auth_pass
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Relay configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Listener for incoming update requests
    #[serde(default)]
    pub listener: Listener,
    /// Upstream WordPress instance
    pub wordpress: WordPressConfig,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listener.validate()?;
        self.wordpress.validate()?;
        Ok(())
    }
}
