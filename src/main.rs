use std::{sync::Arc, time::Duration};

use anyhow::Context;
use book_library_api::{
    routes::{cors_layer, create_router, AppState},
    services::providers::{GeminiProvider, OpenLibraryProvider},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_library_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let model = GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
        config.recommendation_count,
    );
    let catalog = OpenLibraryProvider::new(
        config.open_library_url.clone(),
        Duration::from_secs(config.lookup_timeout_secs),
    )
    .context("Failed to build Open Library client")?;

    let state = Arc::new(AppState::new(
        Arc::new(model),
        Arc::new(catalog),
        config.covers_url.clone(),
        config.recommendation_count,
    ));

    let app = create_router(state).layer(cors_layer(&config.allowed_origins()));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(
        address = %address,
        model = %config.gemini_model,
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
