// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::animal::{Animal, AnimalDraft, AnimalId, Species};
use crate::domain::shelter::{Shelter, ShelterDraft, ShelterError, ShelterId};

/// All shelters plus the total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterPage {
    pub total_count: u64,
    pub data: Vec<Shelter>,
}

#[async_trait]
pub trait ShelterService: Send + Sync {
    async fn list_shelters(&self) -> Result<ShelterPage, ShelterError>;
    async fn get_shelter(&self, id: ShelterId) -> Result<Shelter, ShelterError>;
    async fn create_shelter(&self, draft: ShelterDraft) -> Result<Shelter, ShelterError>;
    async fn update_shelter(&self, id: ShelterId, draft: ShelterDraft) -> Result<Shelter, ShelterError>;
    async fn delete_shelter(&self, id: ShelterId) -> Result<(), ShelterError>;

    async fn list_animals(&self, shelter_id: ShelterId, species: Species) -> Result<Vec<Animal>, ShelterError>;
    async fn add_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        draft: AnimalDraft,
    ) -> Result<Vec<Animal>, ShelterError>;
    async fn update_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        animal_id: AnimalId,
        draft: AnimalDraft,
    ) -> Result<Animal, ShelterError>;
    async fn remove_animal(
        &self,
        shelter_id: ShelterId,
        species: Species,
        animal_id: AnimalId,
    ) -> Result<(), ShelterError>;
}
