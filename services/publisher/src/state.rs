//! Application state shared across handlers

use common::config::Settings;

use crate::clients::{OllamaClient, PixabayClient, WordPressClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub env: String,
    pub wordpress: WordPressClient,
    pub ollama: OllamaClient,
    pub pixabay: PixabayClient,
}

impl AppState {
    /// Build the clients from the loaded settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            env: settings.env.clone(),
            wordpress: WordPressClient::new(settings),
            ollama: OllamaClient::new(settings),
            pixabay: PixabayClient::new(settings),
        }
    }
}
