use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info};

use portal_api::{router, AppState};
use portal_core::ports::{IdentityProvider, RemoteClient};
use portal_core::services::{ClaimService, DocumentService, PolicyService};
use portal_core::{ActionDispatcher, Credentials, SessionBroker, SessionPolicy};
use portal_infrastructure::{GoTrueIdentityProvider, SoapRemoteClient};
use portal_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    portal_shared::telemetry::init_telemetry();

    info!("Portal server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Remote service at {} ({:?})", config.remote.endpoint, config.session);

    // Remote session broker
    let remote: Arc<dyn RemoteClient> = Arc::new(SoapRemoteClient::from_settings(&config.remote)?);
    let broker = SessionBroker::new(
        remote.clone(),
        Credentials::from(&config.remote),
        SessionPolicy::from(&config.session),
    );
    let dispatcher = ActionDispatcher::new(broker.clone(), remote);

    // Identity provider
    let identity: Arc<dyn IdentityProvider> = Arc::new(GoTrueIdentityProvider::from_settings(&config.identity)?);

    let state = AppState {
        claims: ClaimService::new(dispatcher.clone()),
        policies: PolicyService::new(dispatcher.clone()),
        documents: DocumentService::new(dispatcher),
        broker: broker.clone(),
        identity,
    };

    let app = router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the remote session before exit
    broker.close().await;
    info!("Portal server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
