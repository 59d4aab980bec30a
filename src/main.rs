// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Portfolio API Service
//!
//! Serves the portfolio site's dynamic endpoints:
//!
//! - `POST /api/contact`: validated, rate-limited contact form submission
//! - `POST /api/chat`: rate-limited chat stub streaming a canned reply
//! - `GET /health`: liveness check
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `CONTACT_MAX_REQUESTS`: Contact submissions per client per window (default: 5)
//! - `CHAT_MAX_REQUESTS`: Chat messages per client per window (default: 20)
//! - `RATE_WINDOW_MS`: Rate window length in milliseconds (default: 60000)

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_api::{
    config::Config,
    handlers::{chat, contact, health, AppState},
    limiter::RateLimiter,
    validator::SubmissionValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        contact_max = config.contact_rate.max_requests,
        chat_max = config.chat_rate.max_requests,
        window_ms = config.contact_rate.window_ms,
        "Starting portfolio API"
    );

    // Create application state
    let state = Arc::new(AppState {
        contact_limiter: RateLimiter::new(config.contact_rate.clone()),
        chat_limiter: RateLimiter::new(config.chat_rate.clone()),
        validator: SubmissionValidator::new(config.validation.clone()),
        config: config.clone(),
    });

    // Spawn sweep task; the check path never removes idle clients itself.
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let evicted = sweep_state.contact_limiter.sweep().await
                + sweep_state.chat_limiter.sweep().await;
            if evicted > 0 {
                debug!(evicted, "Swept idle rate limit entries");
            }
        }
    });

    // The frontend is a static site on another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/contact", post(contact))
        .route("/api/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let mut config = Config::default();

    if let Ok(addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Some(max) = env_parse("CONTACT_MAX_REQUESTS") {
        config.contact_rate.max_requests = max;
    }
    if let Some(max) = env_parse("CHAT_MAX_REQUESTS") {
        config.chat_rate.max_requests = max;
    }
    if let Some(window_ms) = env_parse("RATE_WINDOW_MS") {
        config.contact_rate.window_ms = window_ms;
        config.chat_rate.window_ms = window_ms;
    }

    config
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
