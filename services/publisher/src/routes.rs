//! Publisher service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    middleware,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::{
    error::{ApiError, ApiResult, PublishError},
    middleware::cors_middleware,
    models::{
        HealthResponse, OptimizeContentRequest, OptimizeContentResponse, PostsQuery,
        PostsResponse, PublishPostRequest, PublishPostResponse,
    },
    pipeline,
    state::AppState,
};

const DEFAULT_STATUS: &str = "draft";
const DEFAULT_PER_PAGE: i64 = 100;

/// Create the router for the publisher service
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/wp-posts", get(list_posts))
        .route("/optimize-content", post(optimize_content))
        .route("/publish-post", post(publish_post));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        env: state.env.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Decode a JSON request body regardless of its declared content type
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        ApiError::BadRequest("Invalid request body".to_string())
    })
}

fn parse_per_page(raw: Option<&str>) -> ApiResult<i64> {
    match raw {
        None => Ok(DEFAULT_PER_PAGE),
        Some(value) => value
            .parse()
            .map_err(|_| ApiError::BadRequest("Invalid per_page parameter".to_string())),
    }
}

/// List WordPress posts
pub async fn list_posts(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<PostsResponse>> {
    let Query(pairs) =
        pairs.map_err(|e| ApiError::BadRequest(format!("Invalid query parameters: {}", e)))?;
    let query = PostsQuery::from_pairs(pairs);

    let per_page = parse_per_page(query.per_page.as_deref())?;
    let status = query.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());

    let posts = state
        .wordpress
        .list_posts(&status, per_page)
        .await
        .map_err(ApiError::upstream("Failed to fetch posts"))
        .inspect_err(|e| error!("{}", e))?;

    Ok(Json(PostsResponse {
        success: true,
        posts,
    }))
}

/// Generate an optimized version of a post and suggest an image for it
pub async fn optimize_content(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<OptimizeContentResponse>> {
    let request: OptimizeContentRequest = parse_body(&body)?;

    let response = pipeline::optimize(&state, request)
        .await
        .inspect_err(|e| error!("{}", e))?;

    Ok(Json(response))
}

/// Publish a post, uploading its featured image first when one is given
pub async fn publish_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PublishPostResponse>, PublishError> {
    let request: PublishPostRequest = parse_body(&body)?;

    let response = pipeline::publish(&state, request)
        .await
        .inspect_err(|e| error!("{}", e))?;

    Ok(Json(response))
}
