// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contract for the shelter aggregate: one repository per
//! aggregate root, interface defined in the domain layer, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `ShelterRepository` | `Shelter` (with its cats and dogs) | `InMemoryShelterRepository`, `PostgresShelterRepository` |
//!
//! ## Storage Backend Abstraction
//!
//! The concrete implementation is selected at startup from the `storage`
//! section of `adoptions-config.yaml`. The in-memory implementation is used
//! for development and testing, PostgreSQL for production.

use async_trait::async_trait;

use crate::domain::shelter::{Shelter, ShelterId};

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

/// Repository interface for Shelter aggregates.
///
/// `save` writes the whole aggregate: the shelter row and the complete set of
/// its animals. Animals missing from the saved aggregate are deleted.
#[async_trait]
pub trait ShelterRepository: Send + Sync {
    /// Reserve the next identifier. Shelters and animals share one sequence.
    async fn next_id(&self) -> Result<i64, RepositoryError>;

    /// Save shelter (create or overwrite)
    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError>;

    /// Find shelter by ID
    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError>;

    /// Find shelter by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Shelter>, RepositoryError>;

    /// List all shelters in insertion order
    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError>;

    /// Count all shelters
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Delete shelter and every animal it owns. Unknown ids are ignored.
    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::animal::Species;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[test]
    fn test_unknown_species_is_serialization_error() {
        let err = "hamster"
            .parse::<Species>()
            .map_err(RepositoryError::Serialization)
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
