//! Gateway configuration.
//!
//! The API key comes from the `GEMINI_API_KEY` environment variable or from
//! `secret.toml` in the platform config directory
//! (e.g. `~/.config/flashpoint/secret.toml` on Linux).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GatewayError, Result};

const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_VIDEO_MODEL: &str = "veo-2.0-generate-001";
const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-fast-generate-001";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    /// Model for choice generation, evaluation and prompt-generation steps.
    pub text_model: String,
    /// Long-running video generation model.
    pub video_model: String,
    /// Image generation model.
    pub image_model: String,
    /// Sleep between long-running operation status checks.
    pub poll_interval: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with default model identifiers.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the text model after construction.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Loads configuration from the environment, falling back to the
    /// secret file.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if neither source yields an API key.
    pub fn from_env() -> Result<Self> {
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                return Ok(Self::new(api_key));
            }
        }
        let path = secret_file_path()?;
        Self::from_secret_file(&path)
    }

    /// Loads configuration from a `secret.toml` file.
    pub fn from_secret_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GatewayError::Config(format!(
                "GEMINI_API_KEY is not set and no secret file found at: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|err| {
            GatewayError::Config(format!(
                "failed to read secret file at {}: {err}",
                path.display()
            ))
        })?;

        let secrets: SecretConfig = toml::from_str(&content).map_err(|err| {
            GatewayError::Config(format!(
                "failed to parse secret file at {}: {err}",
                path.display()
            ))
        })?;

        let gemini = secrets.gemini.ok_or_else(|| {
            GatewayError::Config("secret file has no [gemini] section".to_string())
        })?;

        let mut config = Self::new(gemini.api_key);
        if let Some(model) = gemini.text_model {
            config.text_model = model;
        }
        if let Some(model) = gemini.video_model {
            config.video_model = model;
        }
        if let Some(model) = gemini.image_model {
            config.image_model = model;
        }
        Ok(config)
    }
}

/// Root structure of `secret.toml`.
#[derive(Debug, Clone, Deserialize)]
struct SecretConfig {
    #[serde(default)]
    gemini: Option<GeminiSecrets>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiSecrets {
    api_key: String,
    #[serde(default)]
    text_model: Option<String>,
    #[serde(default)]
    video_model: Option<String>,
    #[serde(default)]
    image_model: Option<String>,
}

fn secret_file_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| GatewayError::Config("could not determine config directory".to_string()))?;
    Ok(config_dir.join("flashpoint").join("secret.toml"))
}
