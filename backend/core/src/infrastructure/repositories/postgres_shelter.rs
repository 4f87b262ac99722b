// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Shelter Repository
//!
//! Production `ShelterRepository` backed by the `shelters` and `animals`
//! tables via `sqlx`. An aggregate write runs in one transaction: upsert the
//! shelter row, delete its animal rows, re-insert the current animals with
//! their collection position.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use std::collections::HashMap;

use crate::domain::animal::{Animal, AnimalId, Species};
use crate::domain::repository::{RepositoryError, ShelterRepository};
use crate::domain::shelter::{Shelter, ShelterId};

pub struct PostgresShelterRepository {
    pool: PgPool,
}

impl PostgresShelterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn shelter_from_row(row: &PgRow) -> Result<Shelter, RepositoryError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let location: String = row.try_get("location")?;
        Ok(Shelter::new(ShelterId(id), name, location))
    }

    fn animal_from_row(row: &PgRow) -> Result<(i64, Species, Animal), RepositoryError> {
        let shelter_id: i64 = row.try_get("shelter_id")?;
        let species_str: String = row.try_get("species")?;
        let species = species_str
            .parse::<Species>()
            .map_err(RepositoryError::Serialization)?;

        let animal = Animal {
            id: AnimalId(row.try_get("id")?),
            name: row.try_get("name")?,
            photo: row.try_get("photo")?,
            kind: row.try_get("type")?,
        };
        Ok((shelter_id, species, animal))
    }

    /// Rows must be ordered by position within each (shelter, species).
    fn attach_animals(shelters: &mut [Shelter], rows: &[PgRow]) -> Result<(), RepositoryError> {
        let index: HashMap<i64, usize> = shelters
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.0, i))
            .collect();

        for row in rows {
            let (shelter_id, species, animal) = Self::animal_from_row(row)?;
            if let Some(&i) = index.get(&shelter_id) {
                match species {
                    Species::Cat => shelters[i].cats.push(animal),
                    Species::Dog => shelters[i].dogs.push(animal),
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ShelterRepository for PostgresShelterRepository {
    async fn next_id(&self) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('entity_id_seq')")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO shelters (id, name, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                location = EXCLUDED.location
            "#,
        )
        .bind(shelter.id.0)
        .bind(&shelter.name)
        .bind(&shelter.location)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM animals WHERE shelter_id = $1")
            .bind(shelter.id.0)
            .execute(&mut *tx)
            .await?;

        for species in [Species::Cat, Species::Dog] {
            for (position, animal) in shelter.animals(species).iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO animals (id, shelter_id, species, position, name, photo, type)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(animal.id.0)
                .bind(shelter.id.0)
                .bind(species.as_str())
                .bind(position as i32)
                .bind(&animal.name)
                .bind(&animal.photo)
                .bind(&animal.kind)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, location FROM shelters WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut shelters = vec![Self::shelter_from_row(&row)?];
        let animal_rows = sqlx::query(
            r#"
            SELECT id, shelter_id, species, name, photo, type
            FROM animals
            WHERE shelter_id = $1
            ORDER BY species, position
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await?;

        Self::attach_animals(&mut shelters, &animal_rows)?;
        Ok(shelters.pop())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Shelter>, RepositoryError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM shelters WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match id {
            Some(id) => self.find_by_id(ShelterId(id)).await,
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, location FROM shelters ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut shelters = rows
            .iter()
            .map(Self::shelter_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let animal_rows = sqlx::query(
            r#"
            SELECT id, shelter_id, species, name, photo, type
            FROM animals
            ORDER BY shelter_id, species, position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Self::attach_animals(&mut shelters, &animal_rows)?;
        Ok(shelters)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shelters")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM animals WHERE shelter_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM shelters WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
