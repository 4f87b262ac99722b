// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Shelter lifecycle service
//!
//! Every operation loads the shelter aggregate, mutates a local copy and
//! writes the whole aggregate back. There is no version check: two concurrent
//! writers to the same shelter race and the last write wins.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Implements the shelter and animal use cases

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::shelter::{ShelterPage, ShelterService};
use crate::domain::animal::{Animal, AnimalDraft, AnimalId, Species};
use crate::domain::repository::{RepositoryError, ShelterRepository};
use crate::domain::shelter::{Shelter, ShelterDraft, ShelterError, ShelterId};
use crate::domain::validation::{validate_animal, ShelterValidator};

pub struct StandardShelterService {
    repository: Arc<dyn ShelterRepository>,
    validator: ShelterValidator,
}

impl StandardShelterService {
    pub fn new(repository: Arc<dyn ShelterRepository>, validator: ShelterValidator) -> Self {
        Self { repository, validator }
    }

    async fn load(&self, id: ShelterId) -> Result<Shelter, ShelterError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ShelterError::ShelterNotFound(id))
    }

    async fn persist(&self, shelter: &Shelter) -> Result<(), ShelterError> {
        self.repository.save(shelter).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => ShelterError::NameTaken(shelter.name.clone()),
            other => other.into(),
        })
    }

    async fn ensure_name_available(&self, name: &str, owner: Option<ShelterId>) -> Result<(), ShelterError> {
        match self.repository.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => Err(ShelterError::NameTaken(name.to_string())),
            _ => Ok(()),
        }
    }

    /// Turn drafts into animals. A draft keeps its id only when it names an
    /// animal already in `existing` (and no earlier draft claimed it).
    async fn assign_ids(&self, drafts: Vec<AnimalDraft>, existing: &[Animal]) -> Result<Vec<Animal>, ShelterError> {
        let mut kept = HashSet::new();
        let mut animals = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let id = match draft.id {
                Some(id) if existing.iter().any(|a| a.id == id) && kept.insert(id) => id,
                _ => AnimalId(self.repository.next_id().await?),
            };
            animals.push(Animal::from_draft(id, draft));
        }

        Ok(animals)
    }
}

#[async_trait]
impl ShelterService for StandardShelterService {
    async fn list_shelters(&self) -> Result<ShelterPage, ShelterError> {
        let data = self.repository.list_all().await?;
        let total_count = self.repository.count().await?;
        debug!(total_count, "Listed shelters");
        Ok(ShelterPage { total_count, data })
    }

    async fn get_shelter(&self, id: ShelterId) -> Result<Shelter, ShelterError> {
        self.load(id).await
    }

    async fn create_shelter(&self, draft: ShelterDraft) -> Result<Shelter, ShelterError> {
        self.validator.validate(&draft)?;
        self.ensure_name_available(&draft.name, None).await?;

        let id = ShelterId(self.repository.next_id().await?);
        let cats = self.assign_ids(draft.cats, &[]).await?;
        let dogs = self.assign_ids(draft.dogs, &[]).await?;

        let shelter = Shelter {
            id,
            name: draft.name,
            location: draft.location,
            cats,
            dogs,
        };
        self.persist(&shelter).await?;

        metrics::counter!("adoptions_shelters_created_total").increment(1);
        info!(shelter_id = %shelter.id, name = %shelter.name, "Created shelter");
        Ok(shelter)
    }

    async fn update_shelter(&self, id: ShelterId, draft: ShelterDraft) -> Result<Shelter, ShelterError> {
        self.validator.validate(&draft)?;
        let current = self.load(id).await?;
        self.ensure_name_available(&draft.name, Some(id)).await?;

        let cats = self.assign_ids(draft.cats, &current.cats).await?;
        let dogs = self.assign_ids(draft.dogs, &current.dogs).await?;

        let shelter = Shelter {
            id,
            name: draft.name,
            location: draft.location,
            cats,
            dogs,
        };
        self.persist(&shelter).await?;

        metrics::counter!("adoptions_shelters_updated_total").increment(1);
        info!(shelter_id = %id, "Replaced shelter");
        Ok(shelter)
    }

    async fn delete_shelter(&self, id: ShelterId) -> Result<(), ShelterError> {
        self.repository.delete(id).await?;
        metrics::counter!("adoptions_shelters_deleted_total").increment(1);
        info!(shelter_id = %id, "Deleted shelter");
        Ok(())
    }

    async fn list_animals(&self, shelter_id: ShelterId, species: Species) -> Result<Vec<Animal>, ShelterError> {
        let shelter = self.load(shelter_id).await?;
        Ok(shelter.animals(species).to_vec())
    }

    async fn add_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        draft: AnimalDraft,
    ) -> Result<Vec<Animal>, ShelterError> {
        validate_animal(&draft)?;
        let mut shelter = self.load(shelter_id).await?;

        let animal = Animal::from_draft(AnimalId(self.repository.next_id().await?), draft);
        let animal_id = animal.id;
        let animals = shelter.add_animal(species, animal).to_vec();
        self.persist(&shelter).await?;

        metrics::counter!("adoptions_animals_added_total", "species" => species.as_str()).increment(1);
        info!(shelter_id = %shelter_id, animal_id = %animal_id, %species, "Added animal to shelter");
        Ok(animals)
    }

    async fn update_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        animal_id: AnimalId,
        draft: AnimalDraft,
    ) -> Result<Animal, ShelterError> {
        validate_animal(&draft)?;
        let mut shelter = self.load(shelter_id).await?;

        let replaced = shelter.replace_animal(species, animal_id, draft)?;
        self.persist(&shelter).await?;

        metrics::counter!("adoptions_animals_replaced_total", "species" => species.as_str()).increment(1);
        info!(shelter_id = %shelter_id, animal_id = %animal_id, %species, "Replaced animal in shelter");
        Ok(replaced)
    }

    async fn remove_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        animal_id: AnimalId,
    ) -> Result<(), ShelterError> {
        let mut shelter = self.load(shelter_id).await?;

        shelter.remove_animal(species, animal_id)?;
        self.persist(&shelter).await?;

        metrics::counter!("adoptions_animals_removed_total", "species" => species.as_str()).increment(1);
        info!(shelter_id = %shelter_id, animal_id = %animal_id, %species, "Removed animal from shelter");
        Ok(())
    }
}
