//! Translation settings: credentials, model choice, prompt text, and
//! generation bounds. Loaded from a TOML file with environment
//! overrides; an explicit object handed to the translator, never global
//! state.

use std::env;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub mod constants {
    use std::time::Duration;

    pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
    pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

    pub const DEFAULT_MAX_TOKENS: u32 = 4096;
    pub const MIN_MAX_TOKENS: u32 = 1024;
    pub const MAX_MAX_TOKENS: u32 = 128_000;
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;

    pub const MODEL_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);
    pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);
    pub const LISTING_TIMEOUT: Duration = Duration::from_secs(30);

    /// Instructions sent as the system prompt unless the user supplies
    /// their own. The output-format footer is appended separately and
    /// cannot be configured away.
    pub const DEFAULT_SYSTEM_PROMPT: &str = "Translate the following German blog post to English. \
        Keep all HTML tags exactly as they are. \
        Do not add or remove any HTML tags. \
        Translate only the text content within the tags.";

    /// Settings files picked up when no explicit path is given.
    pub const CONFIG_PATHS: &[&str] = &["mediumpress.toml", ".mediumpress.toml"];
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("unable to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file: {0}")]
    Malformed(#[from] toml::de::Error),

    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: String::new(),
            model: constants::DEFAULT_MODEL.to_string(),
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            system_prompt: constants::DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: constants::DEFAULT_MAX_TOKENS,
            temperature: constants::DEFAULT_TEMPERATURE,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Settings {
    /// Load settings: explicit file, or the first discovered
    /// [`constants::CONFIG_PATHS`] entry, or pure defaults. Environment
    /// overrides apply on top, then values are validated and clamped.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match constants::CONFIG_PATHS
                .iter()
                .map(Path::new)
                .find(|candidate| candidate.exists())
            {
                Some(discovered) => Self::from_file(discovered)?,
                None => Settings::default(),
            },
        };

        settings.apply_env_overrides();
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(toml::from_str(&raw)?)
    }

    /// `MEDIUMPRESS_API_KEY` (or `ANTHROPIC_API_KEY`),
    /// `MEDIUMPRESS_MODEL` and `MEDIUMPRESS_BASE_URL` override whatever
    /// the file said.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("MEDIUMPRESS_API_KEY") {
            self.api_key = api_key;
        } else if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
            self.api_key = api_key;
        }

        if let Ok(model) = env::var("MEDIUMPRESS_MODEL") {
            self.model = model;
        }

        if let Ok(base_url) = env::var("MEDIUMPRESS_BASE_URL") {
            tracing::info!("base URL overridden from environment: {}", base_url);
            self.base_url = base_url;
        }
    }

    /// Clamp numeric values into their supported ranges and reject
    /// settings no request could be built from.
    pub fn validate(&mut self) -> Result<(), SettingsError> {
        if self.model.trim().is_empty() {
            return Err(SettingsError::Invalid("model must not be empty"));
        }

        if self.base_url.trim().is_empty() {
            return Err(SettingsError::Invalid("base_url must not be empty"));
        }

        match Url::parse(&self.base_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(_) => return Err(SettingsError::Invalid("base_url must use http or https")),
            Err(_) => return Err(SettingsError::Invalid("base_url is not a valid URL")),
        }

        self.max_tokens = self
            .max_tokens
            .clamp(constants::MIN_MAX_TOKENS, constants::MAX_MAX_TOKENS);
        self.temperature = self.temperature.clamp(0.0, 1.0);

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
