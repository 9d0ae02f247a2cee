mod auth;
mod error;
mod pages;
mod state;
mod summarize;

pub use auth::{session_cookie, session_token};
pub use error::ErrorServer;
pub use state::ServerState;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::DistillError;

/// Build the application router.
///
/// Pages, including unknown paths, sit behind the session gate; `/api/*`
/// and `/health` do not.
pub fn router(state: Arc<ServerState>) -> Router {
    let pages = Router::new()
        .route("/", get(pages::home))
        .route("/login", get(pages::login))
        .route("/signup", get(pages::signup))
        .route("/verify-email", get(pages::verify_email))
        .route("/dashboard", get(pages::dashboard))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::route_gate,
        ));

    Router::new()
        .merge(pages)
        .route("/api/summarize", post(summarize::summarize))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/health", get(summarize::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(config: &AppConfig) -> Result<(), DistillError> {
    let state = Arc::new(ServerState::from_config(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
