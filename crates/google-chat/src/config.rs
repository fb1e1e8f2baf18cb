//! Channel configuration: the default space and named space aliases.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable holding the default space (alias or webhook URL).
pub const ENV_GOOGLE_CHAT_SPACE: &str = "GOOGLE_CHAT_SPACE";

/// Environment variable holding a JSON object of `alias -> webhook URL`.
pub const ENV_GOOGLE_CHAT_SPACES: &str = "GOOGLE_CHAT_SPACES";

/// Read-only channel configuration.
///
/// Loaded once by the host application and shared with the channel.
/// The channel never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GoogleChatConfig {
    /// Space used when neither the message nor the notifiable names one.
    #[serde(default)]
    pub space: Option<String>,

    /// Named spaces, mapped to full webhook URLs.
    #[serde(default)]
    pub spaces: HashMap<String, String>,
}

impl GoogleChatConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default space.
    #[must_use]
    pub fn with_default_space(mut self, space: impl Into<String>) -> Self {
        self.space = Some(space.into());
        self
    }

    /// Register a space alias.
    #[must_use]
    pub fn with_space(mut self, alias: impl Into<String>, webhook_url: impl Into<String>) -> Self {
        self.spaces.insert(alias.into(), webhook_url.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// - `GOOGLE_CHAT_SPACE`: default space
    /// - `GOOGLE_CHAT_SPACES`: JSON object, e.g. `{"sales": "https://chat.googleapis.com/..."}`
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidSpaces`] if `GOOGLE_CHAT_SPACES` is not
    /// a JSON object of strings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let space = lookup(ENV_GOOGLE_CHAT_SPACE).filter(|s| !s.is_empty());

        let spaces = match lookup(ENV_GOOGLE_CHAT_SPACES) {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|source| ConfigError::InvalidSpaces {
                    var: ENV_GOOGLE_CHAT_SPACES,
                    source,
                })?
            }
            _ => HashMap::new(),
        };

        debug!(
            has_default_space = space.is_some(),
            alias_count = spaces.len(),
            "Loaded Google Chat configuration from environment"
        );

        Ok(Self { space, spaces })
    }

    /// Parse configuration from TOML.
    ///
    /// ```toml
    /// space = "sales"
    ///
    /// [spaces]
    /// sales = "https://chat.googleapis.com/v1/spaces/XXX/messages?key=..."
    /// ```
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] when the document is malformed.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// The configured default space, if it is non-empty.
    #[must_use]
    pub fn default_space(&self) -> Option<&str> {
        self.space.as_deref().filter(|s| !s.is_empty())
    }
}
