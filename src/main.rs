// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{fmt::Display, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tenant_notes_server::{
    api::{cors_layer, router},
    auth::{password::BCRYPT_COST, prepare_decoy},
    config::{AppConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV, RECOMMENDED_SECRET_LEN},
    seed::seed_demo_data,
    state::AppState,
    storage::{InMemoryStore, SnapshotFile},
};
use tracing_subscriber::EnvFilter;

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env().unwrap_or_else(|e| abort("Invalid configuration", e));
    if config.has_weak_secret() {
        tracing::warn!(
            min_len = RECOMMENDED_SECRET_LEN,
            "JWT_SECRET is shorter than recommended"
        );
    }

    let mut store = match &config.data_dir {
        Some(dir) => SnapshotFile::in_dir(dir)
            .and_then(InMemoryStore::with_snapshot)
            .unwrap_or_else(|e| abort("Failed to open data directory", e)),
        None => {
            tracing::warn!("DATA_DIR not set; data lives in memory only");
            InMemoryStore::new()
        }
    };

    if config.seed_demo_data {
        seed_demo_data(&mut store, BCRYPT_COST).unwrap_or_else(|e| abort("Failed to seed demo data", e));
    }

    prepare_decoy().unwrap_or_else(|e| abort("Failed to prepare login decoy hash", e));

    let cors = cors_layer(config.frontend_url.as_deref())
        .unwrap_or_else(|e| abort("FRONTEND_URL is not a valid origin", e));
    let state = AppState::from_config(store, &config);
    let app = router(state, cors);
    let addr = config.bind_addr;

    match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            if rustls::crypto::ring::default_provider().install_default().is_err() {
                tracing::debug!("rustls crypto provider already installed");
            }

            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .unwrap_or_else(|e| abort("Failed to load TLS certificate", e));

            let handle: Handle<std::net::SocketAddr> = Handle::new();
            tokio::spawn({
                let handle = handle.clone();
                async move {
                    shutdown_signal().await;
                    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
                }
            });

            tracing::info!(%addr, "Tenant notes server listening on https (docs at /docs)");
            if let Err(e) = axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
            {
                abort("HTTPS server failed", e);
            }
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .unwrap_or_else(|e| abort("Failed to bind address", e));

            tracing::info!(%addr, "Tenant notes server listening on http (docs at /docs)");
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
            {
                abort("HTTP server failed", e);
            }
        }
    }

    tracing::info!("Server stopped");
}

/// `RUST_LOG` filter, `LOG_FORMAT=json` for structured output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

fn abort(context: &str, error: impl Display) -> ! {
    tracing::error!(error = %error, "{context}");
    std::process::exit(1);
}
