//! Service settings
//!
//! Settings are read once at startup from the process environment (and an
//! optional `.env` file) and then handed to the clients that need them.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Read `.env` from the working directory (or a parent) into the environment
///
/// Returns the path of the file that was applied. Variables already set in
/// the process environment are left untouched. Call this before
/// [`Settings::load`], and log the outcome once tracing is initialized.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}

/// Read a specific `.env` file into the environment
pub fn load_dotenv_from(path: &Path) -> Option<PathBuf> {
    dotenv::from_path(path).ok().map(|_| path.to_path_buf())
}

/// Settings for the publisher service and its upstream dependencies
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listen port
    pub port: u16,
    /// Environment name (`development`, `production`, ...)
    pub env: String,
    /// Base URL of the WordPress installation
    pub wordpress_url: String,
    pub wordpress_username: String,
    pub wordpress_password: String,
    /// Base URL of the Ollama server
    pub ollama_url: String,
    /// Model used for content generation
    pub ollama_model: String,
    pub pixabay_api_key: String,
    /// Pixabay search endpoint
    pub pixabay_url: String,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// # Environment Variables
    /// - `PORT`: listen port (default: 8080)
    /// - `ENV`: environment name (default: "development")
    /// - `WORDPRESS_URL`: WordPress base URL (default: "https://digitalchew.com")
    /// - `WORDPRESS_USERNAME`, `WORDPRESS_PASSWORD`: credentials (default: empty)
    /// - `OLLAMA_URL`: Ollama base URL (default: "http://localhost:11434")
    /// - `OLLAMA_MODEL`: generation model (default: "mistral")
    /// - `PIXABAY_API_KEY`: Pixabay API key (default: empty)
    /// - `PIXABAY_URL`: Pixabay search endpoint (default: "https://pixabay.com/api/")
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", 8080)?
            .set_default("env", "development")?
            .set_default("wordpress_url", "https://digitalchew.com")?
            .set_default("wordpress_username", "")?
            .set_default("wordpress_password", "")?
            .set_default("ollama_url", "http://localhost:11434")?
            .set_default("ollama_model", "mistral")?
            .set_default("pixabay_api_key", "")?
            .set_default("pixabay_url", "https://pixabay.com/api/")?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }

    /// Whether both WordPress credentials are set
    pub fn has_wordpress_credentials(&self) -> bool {
        !self.wordpress_username.is_empty() && !self.wordpress_password.is_empty()
    }

    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}
