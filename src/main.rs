// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

use std::{env, net::SocketAddr};

use tracing::info;
use tracing_subscriber::EnvFilter;

use custody_orchestrator::{
    api::router, config::Config, fireblocks::FireblocksClient, state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let json = env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration and the signing key are loaded exactly once; handlers
    // never touch the environment.
    let config = Config::from_env().expect("Configuration error");
    let fireblocks = FireblocksClient::new(&config).expect("Failed to build Fireblocks client");
    let state = AppState::new(config, fireblocks);
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .unwrap_or(8000);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    info!("Custody Orchestrator listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
