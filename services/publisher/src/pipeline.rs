//! Request flows that chain several upstream calls
//!
//! Each flow is a fixed sequence of steps. A step receives what the previous
//! steps produced, and the first failing step ends the flow.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    clients::{MediaReference, WordPressClient, pixabay::PROVIDER_NAME},
    error::{ApiError, ApiResult},
    models::{
        OptimizeContentRequest, OptimizeContentResponse, PublishPostRequest, PublishPostResponse,
    },
    state::AppState,
};

const TITLE_SUFFIX: &str = " - Enhanced";

/// Optimize a post: generate content, then look for an illustration
pub async fn optimize(
    state: &AppState,
    request: OptimizeContentRequest,
) -> ApiResult<OptimizeContentResponse> {
    let optimized_content = state
        .ollama
        .generate_content(&request.title, &request.content, &request.excerpt)
        .await
        .map_err(ApiError::upstream("Failed to optimize content"))?;

    let suggested_image = suggest_image(state, &request.title).await;

    Ok(OptimizeContentResponse {
        optimized_title: format!("{}{}", request.title, TITLE_SUFFIX),
        optimized_content,
        suggested_image,
        image_source: PROVIDER_NAME.to_string(),
    })
}

/// Best-effort image search; any failure yields an empty suggestion
async fn suggest_image(state: &AppState, title: &str) -> String {
    match state.pixabay.search_image(title).await {
        Ok(url) => url,
        Err(e) => {
            warn!("No image suggestion for {:?}: {}", title, e);
            String::new()
        }
    }
}

/// Publish a post: upload the featured image if any, then update the post
pub async fn publish(
    state: &AppState,
    request: PublishPostRequest,
) -> ApiResult<PublishPostResponse> {
    let featured_media =
        resolve_featured_media(&state.wordpress, &request.featured_image_url, Utc::now()).await?;

    state
        .wordpress
        .update_post(
            request.post_id,
            &request.title,
            &request.content,
            featured_media.as_ref(),
        )
        .await
        .map_err(ApiError::upstream("Failed to publish post"))?;

    info!("Post {} published", request.post_id);
    Ok(PublishPostResponse {
        success: true,
        message: "Post published successfully".to_string(),
        post_id: request.post_id,
    })
}

/// Upload the featured image, or return `None` when no URL was given
async fn resolve_featured_media(
    wordpress: &WordPressClient,
    image_url: &str,
    now: DateTime<Utc>,
) -> ApiResult<Option<MediaReference>> {
    if image_url.is_empty() {
        return Ok(None);
    }

    let media = wordpress
        .upload_media(image_url, &featured_filename(now))
        .await
        .map_err(ApiError::upstream("Failed to upload featured image"))?;

    Ok(Some(media))
}

/// Name for an uploaded featured image, unique per nanosecond
pub fn featured_filename(now: DateTime<Utc>) -> String {
    format!(
        "featured-{}{:09}.jpg",
        now.timestamp(),
        now.timestamp_subsec_nanos()
    )
}
