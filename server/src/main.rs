mod config;
mod cookies;
mod guard;
mod identity;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let identity = match identity::HttpIdentityProvider::new(&config) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!(error = %e, "identity client init failed");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let state = state::AppState::new(config, identity);

    let app = match routes::leptos_app(state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "router init failed");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "storefront listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}
