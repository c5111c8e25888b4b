//! Pixabay image search client

use common::{
    config::Settings,
    error::{ClientError, ClientResult},
};
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{error, info};

use super::{decode_json, expect_status};

const SERVICE: &str = "Pixabay";

/// Name reported as the source of suggested images
pub const PROVIDER_NAME: &str = "Pixabay";

const MIN_QUERY_CHARS: usize = 3;
const MAX_QUERY_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "largeImageURL", default)]
    large_image_url: String,
    #[serde(rename = "webformatURL", default)]
    webformat_url: String,
}

/// Clean a free-text query before sending it to the search API
///
/// Surrounding whitespace is trimmed, then markup tags are removed while their
/// inner text is kept. Queries shorter than 3 characters are rejected, longer
/// than 100 characters are cut.
pub fn sanitize_query(raw: &str) -> ClientResult<String> {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex"));

    let cleaned = regex.replace_all(raw.trim(), "");

    if cleaned.chars().count() < MIN_QUERY_CHARS {
        return Err(ClientError::Validation("query too short".to_string()));
    }

    Ok(cleaned.chars().take(MAX_QUERY_CHARS).collect())
}

/// Client for the Pixabay search API
#[derive(Clone)]
pub struct PixabayClient {
    http: reqwest::Client,
    search_url: String,
    api_key: String,
}

impl PixabayClient {
    /// Create a new Pixabay client
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            search_url: settings.pixabay_url.clone(),
            api_key: settings.pixabay_api_key.clone(),
        }
    }

    /// Find a horizontal photo matching `query` and return its URL
    pub async fn search_image(&self, query: &str) -> ClientResult<String> {
        let query = sanitize_query(query)?;

        if self.api_key.is_empty() {
            return Err(ClientError::Validation("api key missing".to_string()));
        }

        info!("GET {} (q={})", self.search_url, query);

        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", "3"),
                ("safesearch", "true"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Pixabay.Search: {}", e);
                ClientError::Fetch(format!("failed to search Pixabay: {}", e))
            })?;

        let response = expect_status(SERVICE, "Pixabay.Search", response, &[StatusCode::OK]).await?;
        let results: SearchResponse = decode_json(SERVICE, response).await?;

        let hit = results
            .hits
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound("no images found".to_string()))?;

        let url = if hit.large_image_url.is_empty() {
            hit.webformat_url
        } else {
            hit.large_image_url
        };

        info!("Pixabay.Search: found {}", url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags_and_whitespace() {
        assert_eq!(sanitize_query("  <i>cats</i>  ").unwrap(), "cats");
        assert_eq!(sanitize_query("<b>dog</b>").unwrap(), "dog");
        assert_eq!(sanitize_query("red <span class=\"x\">fox</span>").unwrap(), "red fox");
    }

    #[test]
    fn test_sanitize_rejects_short_queries() {
        assert!(matches!(
            sanitize_query("ab"),
            Err(ClientError::Validation(msg)) if msg == "query too short"
        ));
        assert!(sanitize_query("<p>ab</p>").is_err());
        assert!(sanitize_query("   ").is_err());
    }

    #[test]
    fn test_sanitize_truncates_long_queries() {
        let query = "x".repeat(150);
        assert_eq!(sanitize_query(&query).unwrap().chars().count(), 100);

        let query = "é".repeat(120);
        assert_eq!(sanitize_query(&query).unwrap(), "é".repeat(100));
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        assert_eq!(sanitize_query("été").unwrap(), "été");
        assert!(sanitize_query("çà").is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let settings = Settings {
            port: 8080,
            env: "test".to_string(),
            wordpress_url: String::new(),
            wordpress_username: String::new(),
            wordpress_password: String::new(),
            ollama_url: String::new(),
            ollama_model: String::new(),
            pixabay_api_key: String::new(),
            // Unroutable, a request would fail with Fetch instead
            pixabay_url: "http://127.0.0.1:9/api/".to_string(),
        };

        let err = PixabayClient::new(&settings).search_image("mountains").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(msg) if msg == "api key missing"));
    }
}
