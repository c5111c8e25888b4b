//! WordPress REST API client
//!
//! Covers the three calls the publisher needs: listing posts, updating a
//! post, and uploading a featured image to the media library.

use common::{
    auth::basic_auth,
    config::Settings,
    error::{ClientError, ClientResult},
};
use reqwest::{
    RequestBuilder, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

use super::{decode_json, expect_status};

const SERVICE: &str = "WordPress";

/// Post as returned by the WordPress REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "rendered_text")]
    pub title: String,
    #[serde(default, deserialize_with = "rendered_text")]
    pub content: String,
    #[serde(default, deserialize_with = "rendered_text")]
    pub excerpt: String,
    #[serde(default)]
    pub status: PostStatus,
    /// Featured media id, 0 when the post has none
    #[serde(default)]
    pub featured_media: u64,
    #[serde(default)]
    pub link: String,
}

/// Publication status of a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Future,
    #[default]
    Draft,
    Pending,
    Private,
    Trash,
    #[serde(other)]
    Unknown,
}

/// WordPress sends text fields either as plain strings or as `{ "rendered": ... }`
fn rendered_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Plain(String),
        Rendered { rendered: String },
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Plain(text) => text,
        Text::Rendered { rendered } => rendered,
    })
}

/// Media library item created by [`WordPressClient::upload_media`]
///
/// Only an upload can produce one, so a featured media id sent with a post
/// update always refers to media uploaded during the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    id: u64,
}

impl MediaReference {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Body returned by `POST /media`
#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    id: Option<Value>,
}

impl MediaUploadResponse {
    /// Convert the loosely typed `id` into a media id
    fn media_id(&self) -> Option<u64> {
        let id = self.id.as_ref()?;
        id.as_u64().or_else(|| {
            id.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
    }
}

/// Client for the WordPress REST API
#[derive(Clone)]
pub struct WordPressClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    /// `Authorization` header value, set when both credentials are configured
    authorization: Option<String>,
}

impl WordPressClient {
    /// Create a new WordPress client
    pub fn new(settings: &Settings) -> Self {
        let authorization = settings.has_wordpress_credentials().then(|| {
            basic_auth(&settings.wordpress_username, &settings.wordpress_password)
        });

        Self {
            http: reqwest::Client::new(),
            base_url: settings.wordpress_url.trim_end_matches('/').to_string(),
            username: settings.wordpress_username.clone(),
            authorization,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.authorization {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }

    /// Fetch posts with the given status
    pub async fn list_posts(&self, status: &str, per_page: i64) -> ClientResult<Vec<Post>> {
        let url = format!("{}?_embed", self.endpoint("posts"));
        info!("GET {} (status={}, per_page={}, user={})", url, status, per_page, self.username);

        let request = self
            .http
            .get(&url)
            .query(&[("status", status.to_string()), ("per_page", per_page.to_string())])
            .header(ACCEPT, "application/json");

        let response = self.authorize(request).send().await.map_err(|e| {
            error!("WP.ListPosts: {}", e);
            ClientError::Fetch(format!("failed to fetch posts: {}", e))
        })?;

        let response = expect_status(SERVICE, "WP.ListPosts", response, &[StatusCode::OK]).await?;
        let posts: Vec<Post> = decode_json(SERVICE, response).await.inspect_err(|e| {
            error!("WP.ListPosts: {}", e);
        })?;

        info!("WP.ListPosts: retrieved {} posts", posts.len());
        Ok(posts)
    }

    /// Update the title, content, and featured media of a post
    ///
    /// Without a media reference the post's featured media is cleared (`0`).
    pub async fn update_post(
        &self,
        post_id: u64,
        title: &str,
        content: &str,
        featured_media: Option<&MediaReference>,
    ) -> ClientResult<()> {
        let url = self.endpoint(&format!("posts/{}", post_id));
        info!("POST {} (user={})", url, self.username);

        let payload = json!({
            "title": title,
            "content": content,
            "featured_media": featured_media.map_or(0, MediaReference::id),
        });

        let request = self.http.post(&url).json(&payload);
        let response = self.authorize(request).send().await.map_err(|e| {
            error!("WP.UpdatePost: {}", e);
            ClientError::Fetch(format!("failed to update post: {}", e))
        })?;

        expect_status(SERVICE, "WP.UpdatePost", response, &[StatusCode::OK]).await?;

        info!("WP.UpdatePost: post {} updated", post_id);
        Ok(())
    }

    /// Download the image at `source_url` and upload it to the media library
    pub async fn upload_media(&self, source_url: &str, filename: &str) -> ClientResult<MediaReference> {
        info!("Uploading media {} from {}", filename, source_url);

        let image = self
            .http
            .get(source_url)
            .send()
            .await
            .map_err(|e| ClientError::Fetch(format!("failed to fetch image: {}", e)))?;

        if image.status() != StatusCode::OK {
            return Err(ClientError::Fetch(format!(
                "failed to fetch image: status {}",
                image.status().as_u16()
            )));
        }

        let image_data = image
            .bytes()
            .await
            .map_err(|e| ClientError::Fetch(format!("failed to read image data: {}", e)))?;

        let request = self
            .http
            .post(self.endpoint("media"))
            .header(CONTENT_TYPE, "image/jpeg")
            .header(CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename))
            .body(image_data);

        let response = self.authorize(request).send().await.map_err(|e| {
            error!("WP.UploadMedia: {}", e);
            ClientError::Fetch(format!("failed to upload media: {}", e))
        })?;

        let response = expect_status(
            SERVICE,
            "WP.UploadMedia",
            response,
            &[StatusCode::OK, StatusCode::CREATED],
        )
        .await?;

        let upload: MediaUploadResponse = decode_json(SERVICE, response).await?;
        let id = upload.media_id().ok_or_else(|| ClientError::InvalidResponse {
            service: SERVICE,
            message: "media response has no numeric id".to_string(),
        })?;

        info!("WP.UploadMedia: media id {}", id);
        Ok(MediaReference { id })
    }
}
