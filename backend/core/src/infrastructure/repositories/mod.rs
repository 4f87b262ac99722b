// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the `ShelterRepository` abstraction
//! defined in the domain layer.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve shelter aggregates
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! - **PostgresShelterRepository** - `shelters` and `animals` tables, one
//!   transaction per aggregate write
//! - **InMemoryShelterRepository** - lock-protected map for tests and development

pub mod postgres_shelter;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::repository::{RepositoryError, ShelterRepository};
use crate::domain::shelter::{Shelter, ShelterId};

/// Shelters keyed by id. Ids are issued in increasing order, so map order is
/// insertion order.
#[derive(Clone)]
pub struct InMemoryShelterRepository {
    shelters: Arc<RwLock<BTreeMap<ShelterId, Shelter>>>,
    sequence: Arc<AtomicI64>,
}

impl InMemoryShelterRepository {
    pub fn new() -> Self {
        Self {
            shelters: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ShelterId, Shelter>>, RepositoryError> {
        self.shelters
            .read()
            .map_err(|_| RepositoryError::Unknown("Shelter store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<ShelterId, Shelter>>, RepositoryError> {
        self.shelters
            .write()
            .map_err(|_| RepositoryError::Unknown("Shelter store lock poisoned".to_string()))
    }
}

impl Default for InMemoryShelterRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShelterRepository for InMemoryShelterRepository {
    async fn next_id(&self) -> Result<i64, RepositoryError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError> {
        let mut shelters = self.write()?;
        if shelters
            .values()
            .any(|s| s.id != shelter.id && s.name == shelter.name)
        {
            return Err(RepositoryError::Conflict(format!(
                "shelter name '{}' already exists",
                shelter.name
            )));
        }
        shelters.insert(shelter.id, shelter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Shelter>, RepositoryError> {
        Ok(self.read()?.values().find(|s| s.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.read()?.len() as u64)
    }

    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError> {
        // Animals live inside the aggregate, so they go with it.
        self.write()?.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_shared_and_increasing() {
        let repo = InMemoryShelterRepository::new();
        assert_eq!(repo.next_id().await.unwrap(), 1);
        assert_eq!(repo.next_id().await.unwrap(), 2);
        assert_eq!(repo.clone().next_id().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = InMemoryShelterRepository::new();
        for name in ["Zebra", "Alpha", "Mid"] {
            let id = ShelterId(repo.next_id().await.unwrap());
            repo.save(&Shelter::new(id, name, "Brasov")).await.unwrap();
        }

        let names: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Zebra", "Alpha", "Mid"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unique_name_conflict() {
        let repo = InMemoryShelterRepository::new();
        repo.save(&Shelter::new(ShelterId(1), "Paws", "Brasov")).await.unwrap();

        let err = repo
            .save(&Shelter::new(ShelterId(2), "Paws", "Iasi"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        // Overwriting the same shelter keeps its name
        repo.save(&Shelter::new(ShelterId(1), "Paws", "Iasi")).await.unwrap();
        assert_eq!(repo.find_by_name("Paws").await.unwrap().unwrap().location, "Iasi");
    }

    #[tokio::test]
    async fn test_delete_missing_is_silent() {
        let repo = InMemoryShelterRepository::new();
        repo.delete(ShelterId(42)).await.unwrap();
        assert!(repo.find_by_id(ShelterId(42)).await.unwrap().is_none());
    }
}
