// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server startup

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use adoptions_core::{
    application::{repository_factory::create_shelter_repository, StandardShelterService},
    domain::config::AdoptionsConfig,
    infrastructure::credentials::InMemoryCredentialStore,
    presentation::{app, AppState},
};

/// Command-line values that take precedence over `spec.server`.
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub async fn start_server(config_path: Option<PathBuf>, overrides: ServeOverrides) -> Result<()> {
    let config = AdoptionsConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    info!("Configuration loaded: name={}", config.metadata.name);

    if config.spec.observability.metrics.enabled {
        install_metrics_exporter(config.spec.observability.metrics.port)?;
    }

    let state = build_state(&config).await?;
    let router = app(state);

    let host = overrides
        .host
        .unwrap_or_else(|| config.spec.server.bind_address.clone());
    let port = overrides.port.unwrap_or(config.spec.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Adoptions API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Adoptions API shutting down");

    Ok(())
}

/// Wire repository, service and credential store for `config`.
///
/// For the postgres backend this connects and migrates the database.
pub async fn build_state(config: &AdoptionsConfig) -> Result<AppState> {
    let backend = config.spec.storage.to_backend()?;
    let repository = create_shelter_repository(&backend)
        .await
        .context("Failed to initialize shelter repository")?;

    let shelter_service = Arc::new(StandardShelterService::new(
        repository,
        config.spec.validation.to_validator(),
    ));

    let security = &config.spec.security;
    if security.users.is_empty() {
        warn!("No users configured; only anonymous routes will be reachable");
    }
    let credentials = Arc::new(InMemoryCredentialStore::from_config(security));

    Ok(AppState::new(shelter_service, credentials, security.realm.clone()))
}

fn install_metrics_exporter(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;
    info!("Prometheus metrics exposed on {}", addr);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
