//! API models for request and response payloads

use serde::{Deserialize, Serialize};

use crate::clients::Post;

/// Query parameters for post listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsQuery {
    /// Post status filter (default: draft)
    pub status: Option<String>,
    /// Page size, kept raw so that a bad value can be reported as such
    pub per_page: Option<String>,
}

impl PostsQuery {
    /// Collect the known parameters, keeping the first value of a repeated key
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "per_page" => &mut query.per_page,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Response for post listing
#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub success: bool,
    pub posts: Vec<Post>,
}

/// Request for content optimization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptimizeContentRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
}

/// Response for content optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeContentResponse {
    pub optimized_title: String,
    pub optimized_content: String,
    /// Suggested image URL, empty when no image could be found
    pub suggested_image: String,
    pub image_source: String,
}

/// Request for publishing a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishPostRequest {
    pub post_id: u64,
    pub title: String,
    pub content: String,
    /// Image to upload and set as featured media, empty for none
    pub featured_image_url: String,
}

/// Response for publishing a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostResponse {
    pub success: bool,
    pub message: String,
    pub post_id: u64,
}

/// Response for the health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub env: String,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_posts_query_keeps_first_value() {
        let query = PostsQuery::from_pairs(pairs(&[
            ("status", "publish"),
            ("per_page", "5"),
            ("status", "draft"),
            ("per_page", "abc"),
        ]));

        assert_eq!(query.status.as_deref(), Some("publish"));
        assert_eq!(query.per_page.as_deref(), Some("5"));
    }

    #[test]
    fn test_posts_query_ignores_unknown_keys() {
        let query = PostsQuery::from_pairs(pairs(&[("_embed", ""), ("page", "2")]));
        assert_eq!(query, PostsQuery::default());
    }
}
