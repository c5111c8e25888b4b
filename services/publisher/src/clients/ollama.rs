//! Ollama text generation client

use common::{
    config::Settings,
    error::{ClientError, ClientResult},
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{decode_json, expect_status};

const SERVICE: &str = "Ollama";

/// Request body for `POST /api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Build the optimization prompt for a post
pub fn optimization_prompt(title: &str, content: &str, excerpt: &str) -> String {
    format!(
        "You are an expert content optimizer. Please optimize the following blog post content:\n\
         \n\
         Title: {}\n\
         Content: {}\n\
         Excerpt: {}\n\
         \n\
         Provide an optimized version with better SEO, readability, and engagement. \
         Return only the optimized content without explanations.",
        title, content, excerpt
    )
}

/// Client for an Ollama generation endpoint
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.ollama_url.trim_end_matches('/').to_string(),
            model: settings.ollama_model.clone(),
        }
    }

    /// Ask the model for an optimized version of a post
    pub async fn generate_content(
        &self,
        title: &str,
        content: &str,
        excerpt: &str,
    ) -> ClientResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        info!("POST {} (model={})", url, self.model);

        let body = GenerateRequest {
            model: &self.model,
            prompt: optimization_prompt(title, content, excerpt),
            stream: false,
        };

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            error!("Ollama.Generate: {}", e);
            ClientError::Fetch(format!("failed to connect to Ollama: {}", e))
        })?;

        let response = expect_status(SERVICE, "Ollama.Generate", response, &[StatusCode::OK]).await?;
        let generated: GenerateResponse = decode_json(SERVICE, response).await?;

        info!("Ollama.Generate: {} characters generated", generated.response.chars().count());
        Ok(generated.response)
    }
}
