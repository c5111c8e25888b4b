//! Content publisher service
//!
//! Optimizes blog posts with a local language model, suggests a stock photo
//! for them, and publishes the result to WordPress.

pub mod clients;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
