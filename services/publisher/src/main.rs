use anyhow::Result;
use common::config::{Settings, load_dotenv};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use publisher::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = load_dotenv();
    let settings = Settings::load()?;

    // Initialize logging
    let default_level = if settings.is_production() { "info" } else { "debug" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting publisher service");
    if let Some(path) = dotenv {
        info!("Loaded environment overrides from {}", path.display());
    }
    info!("Environment: {}", settings.env);
    info!("Port: {}", settings.port);
    info!("WordPress: {}", settings.wordpress_url);
    info!("Ollama: {} ({})", settings.ollama_url, settings.ollama_model);

    if settings.wordpress_url.is_empty() {
        warn!("WORDPRESS_URL not set");
    }
    if settings.pixabay_api_key.is_empty() {
        warn!("PIXABAY_API_KEY not set, image suggestions are disabled");
    }

    let app = create_router(AppState::new(&settings));

    let address = format!("0.0.0.0:{}", settings.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Publisher service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
