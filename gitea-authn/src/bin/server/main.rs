use std::sync::Arc;

use auth::Authenticator;
use auth::AuthenticatorSettings;
use auth::ProofHasher;
use auth::TokenStore;
use gitea_authn::config::Config;
use gitea_authn::gitea::GiteaMembershipResolver;
use gitea_authn::inbound::http::router::create_router;
use gitea_authn::stores::TokenStoreBackend;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitea_authn=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gitea-authn",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        gitea_api_uri = %config.gitea.api_uri,
        http_timeout_secs = config.gitea.http_timeout_secs,
        revalidate_after_secs = config.gitea.revalidate_after_secs,
        "Configuration loaded"
    );

    let token_store = Arc::new(TokenStoreBackend::connect(&config.token_store).await?);
    tracing::info!(
        backend = token_store.kind(),
        timeout_ms = config.token_store.timeout_ms,
        "Token store ready"
    );

    let resolver = Arc::new(GiteaMembershipResolver::new(&config.gitea)?);
    let proof_hasher = ProofHasher::with_params(
        config.hasher.memory_kib,
        config.hasher.iterations,
        config.hasher.parallelism,
    )?;

    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&token_store),
        resolver,
        proof_hasher,
        AuthenticatorSettings {
            revalidate_after: config.gitea.revalidate_after(),
            store_timeout: config.token_store.timeout(),
        },
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    token_store.close().await;
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
