// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Shelter Aggregate
//!
//! A [`Shelter`] is the aggregate root: it exclusively owns its cats and dogs
//! and is always persisted as a whole. Animal operations mutate a loaded copy
//! of the aggregate; the caller writes the result back through
//! [`crate::domain::repository::ShelterRepository::save`].
//!
//! Replacing or removing an animal that is not in the collection is an error
//! in both cases ([`ShelterError::AnimalNotFound`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::animal::{Animal, AnimalDraft, AnimalId, Species};
use crate::domain::repository::RepositoryError;
use crate::domain::validation::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelterId(pub i64);

impl fmt::Display for ShelterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub cats: Vec<Animal>,
    #[serde(default)]
    pub dogs: Vec<Animal>,
}

impl Shelter {
    pub fn new(id: ShelterId, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            cats: Vec::new(),
            dogs: Vec::new(),
        }
    }

    pub fn animals(&self, species: Species) -> &[Animal] {
        match species {
            Species::Cat => &self.cats,
            Species::Dog => &self.dogs,
        }
    }

    fn animals_mut(&mut self, species: Species) -> &mut Vec<Animal> {
        match species {
            Species::Cat => &mut self.cats,
            Species::Dog => &mut self.dogs,
        }
    }

    /// Append an animal and return the whole updated collection.
    pub fn add_animal(&mut self, species: Species, animal: Animal) -> &[Animal] {
        let animals = self.animals_mut(species);
        animals.push(animal);
        animals
    }

    /// Replace the animal with `animal_id` in place, keeping its identifier and position.
    pub fn replace_animal(
        &mut self,
        species: Species,
        animal_id: AnimalId,
        draft: AnimalDraft,
    ) -> Result<Animal, ShelterError> {
        let shelter_id = self.id;
        let slot = self
            .animals_mut(species)
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or(ShelterError::AnimalNotFound {
                species,
                shelter_id,
                animal_id,
            })?;

        *slot = Animal::from_draft(animal_id, draft);
        Ok(slot.clone())
    }

    /// Remove the animal with `animal_id`, returning it.
    pub fn remove_animal(&mut self, species: Species, animal_id: AnimalId) -> Result<Animal, ShelterError> {
        let shelter_id = self.id;
        let animals = self.animals_mut(species);
        let position = animals
            .iter()
            .position(|a| a.id == animal_id)
            .ok_or(ShelterError::AnimalNotFound {
                species,
                shelter_id,
                animal_id,
            })?;

        Ok(animals.remove(position))
    }
}

/// Client-supplied shelter data for create and full update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cats: Vec<AnimalDraft>,
    #[serde(default)]
    pub dogs: Vec<AnimalDraft>,
}

impl ShelterDraft {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Default::default()
        }
    }
}

/// Errors raised by shelter and animal operations.
#[derive(Debug, Error)]
pub enum ShelterError {
    #[error("Shelter with id {0} not found")]
    ShelterNotFound(ShelterId),

    #[error("{species} with id {animal_id} not found in shelter {shelter_id}: already deleted or entity missing")]
    AnimalNotFound {
        species: Species,
        shelter_id: ShelterId,
        animal_id: AnimalId,
    },

    #[error("{0}")]
    LocationRejected(String),

    #[error("{}", .0.message)]
    ValidationFailed(ValidationReport),

    #[error("Shelter name '{0}' is already taken")]
    NameTaken(String),

    #[error("Storage failure: {0}")]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(id: i64, name: &str) -> Animal {
        Animal {
            id: AnimalId(id),
            name: name.to_string(),
            photo: format!("{}.jpg", name.to_lowercase()),
            kind: "cat".to_string(),
        }
    }

    fn shelter_with_cats() -> Shelter {
        let mut shelter = Shelter::new(ShelterId(1), "Brasov Shelter", "Brasov");
        shelter.cats = vec![animal(2, "Tom"), animal(3, "Felix"), animal(4, "Garfield")];
        shelter
    }

    #[test]
    fn test_add_animal_returns_full_collection() {
        let mut shelter = shelter_with_cats();
        let cats = shelter.add_animal(Species::Cat, animal(5, "Salem"));
        assert_eq!(cats.len(), 4);
        assert_eq!(cats[3].id, AnimalId(5));
        assert!(shelter.dogs.is_empty());
    }

    #[test]
    fn test_replace_animal_keeps_id_and_position() {
        let mut shelter = shelter_with_cats();
        let before = shelter.clone();

        let replaced = shelter
            .replace_animal(Species::Cat, AnimalId(3), AnimalDraft::new("Felix II", "f2.jpg", "tabby"))
            .unwrap();

        assert_eq!(replaced.id, AnimalId(3));
        assert_eq!(replaced.name, "Felix II");
        assert_eq!(replaced.kind, "tabby");
        assert_eq!(shelter.cats[1], replaced);
        assert_eq!(shelter.cats[0], before.cats[0]);
        assert_eq!(shelter.cats[2], before.cats[2]);
    }

    #[test]
    fn test_replace_ignores_id_in_payload() {
        let mut shelter = shelter_with_cats();
        let mut draft = AnimalDraft::new("Tommy", "t.jpg", "cat");
        draft.id = Some(AnimalId(42));

        let replaced = shelter.replace_animal(Species::Cat, AnimalId(2), draft).unwrap();
        assert_eq!(replaced.id, AnimalId(2));
    }

    #[test]
    fn test_replace_missing_animal_fails_without_change() {
        let mut shelter = shelter_with_cats();
        let before = shelter.clone();

        let err = shelter
            .replace_animal(Species::Cat, AnimalId(99), AnimalDraft::new("Ghost", "", "cat"))
            .unwrap_err();

        assert!(matches!(err, ShelterError::AnimalNotFound { animal_id: AnimalId(99), .. }));
        assert_eq!(shelter, before);
    }

    #[test]
    fn test_replace_does_not_cross_species() {
        let mut shelter = shelter_with_cats();
        let err = shelter
            .replace_animal(Species::Dog, AnimalId(2), AnimalDraft::new("Rex", "", "dog"))
            .unwrap_err();
        assert!(matches!(err, ShelterError::AnimalNotFound { species: Species::Dog, .. }));
    }

    #[test]
    fn test_remove_animal() {
        let mut shelter = shelter_with_cats();

        let removed = shelter.remove_animal(Species::Cat, AnimalId(3)).unwrap();
        assert_eq!(removed.name, "Felix");
        assert_eq!(
            shelter.cats.iter().map(|c| c.id.0).collect::<Vec<_>>(),
            vec![2, 4]
        );

        let err = shelter.remove_animal(Species::Cat, AnimalId(3)).unwrap_err();
        assert!(err.to_string().contains("already deleted or entity missing"));
    }
}
