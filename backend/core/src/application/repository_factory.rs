// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates the concrete shelter repository for the configured storage backend,
//! keeping the domain layer free of infrastructure dependencies.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Wire a `ShelterRepository` implementation at startup

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::domain::repository::{ShelterRepository, StorageBackend};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::postgres_shelter::PostgresShelterRepository;
use crate::infrastructure::repositories::InMemoryShelterRepository;

/// Creates a ShelterRepository implementation based on the configured backend.
///
/// For PostgreSQL this connects the pool and applies pending migrations.
pub async fn create_shelter_repository(backend: &StorageBackend) -> Result<Arc<dyn ShelterRepository>> {
    match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory shelter repository");
            Ok(Arc::new(InMemoryShelterRepository::new()))
        }
        StorageBackend::PostgreSQL(config) => {
            let database = Database::new(&config.connection_string, config.max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            database.migrate().await.context("Failed to run database migrations")?;
            info!("Using PostgreSQL shelter repository");
            Ok(Arc::new(PostgresShelterRepository::new(database.get_pool().clone())))
        }
    }
}
