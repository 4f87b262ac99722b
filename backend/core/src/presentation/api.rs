// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! REST surface for shelters and their animals.
//!
//! Cat and dog routes are built from one template; the [`Species`] of a route
//! reaches handlers as a request extension.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Extension, Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::application::shelter::{ShelterPage, ShelterService};
use crate::domain::animal::{Animal, AnimalDraft, AnimalId, Species};
use crate::domain::security::CredentialStore;
use crate::domain::shelter::{Shelter, ShelterDraft, ShelterId};
use crate::presentation::auth::require_access;
use crate::presentation::error::ApiError;
use crate::presentation::extract::{ApiJson, ApiPath};

#[derive(Clone)]
pub struct AppState {
    pub shelter_service: Arc<dyn ShelterService>,
    pub credentials: Arc<dyn CredentialStore>,
    pub realm: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        shelter_service: Arc<dyn ShelterService>,
        credentials: Arc<dyn CredentialStore>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            shelter_service,
            credentials,
            realm: realm.into(),
            started_at: Instant::now(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/shelters", get(list_shelters).post(create_shelter))
        .route(
            "/shelters/{id}",
            get(get_shelter).put(update_shelter).delete(delete_shelter),
        )
        .merge(animal_routes(Species::Cat))
        .merge(animal_routes(Species::Dog))
        .layer(middleware::from_fn_with_state(state.clone(), require_access))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn animal_routes(species: Species) -> Router<AppState> {
    let collection = format!("/shelters/{{id}}/{}", species.collection_name());
    let member = format!("{}/{{animal_id}}", collection);

    Router::new()
        .route(&collection, get(list_animals).put(add_animal))
        .route(&member, patch(update_animal).delete(remove_animal))
        .layer(Extension(species))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

async fn list_shelters(State(state): State<AppState>) -> Result<Json<ShelterPage>, ApiError> {
    Ok(Json(state.shelter_service.list_shelters().await?))
}

async fn get_shelter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ShelterId>,
) -> Result<Json<Shelter>, ApiError> {
    Ok(Json(state.shelter_service.get_shelter(id).await?))
}

async fn create_shelter(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ShelterDraft>,
) -> Result<Json<Shelter>, ApiError> {
    Ok(Json(state.shelter_service.create_shelter(draft).await?))
}

async fn update_shelter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ShelterId>,
    ApiJson(draft): ApiJson<ShelterDraft>,
) -> Result<Json<Shelter>, ApiError> {
    Ok(Json(state.shelter_service.update_shelter(id, draft).await?))
}

async fn delete_shelter(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ShelterId>,
) -> Result<StatusCode, ApiError> {
    state.shelter_service.delete_shelter(id).await?;
    Ok(StatusCode::GONE)
}

async fn list_animals(
    State(state): State<AppState>,
    Extension(species): Extension<Species>,
    ApiPath(shelter_id): ApiPath<ShelterId>,
) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(state.shelter_service.list_animals(shelter_id, species).await?))
}

async fn add_animal(
    State(state): State<AppState>,
    Extension(species): Extension<Species>,
    ApiPath(shelter_id): ApiPath<ShelterId>,
    ApiJson(draft): ApiJson<AnimalDraft>,
) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(
        state.shelter_service.add_animal(shelter_id, species, draft).await?,
    ))
}

async fn update_animal(
    State(state): State<AppState>,
    Extension(species): Extension<Species>,
    ApiPath((shelter_id, animal_id)): ApiPath<(ShelterId, AnimalId)>,
    ApiJson(draft): ApiJson<AnimalDraft>,
) -> Result<Json<Animal>, ApiError> {
    Ok(Json(
        state
            .shelter_service
            .update_animal(shelter_id, species, animal_id, draft)
            .await?,
    ))
}

async fn remove_animal(
    State(state): State<AppState>,
    Extension(species): Extension<Species>,
    ApiPath((shelter_id, animal_id)): ApiPath<(ShelterId, AnimalId)>,
) -> Result<StatusCode, ApiError> {
    state
        .shelter_service
        .remove_animal(shelter_id, species, animal_id)
        .await?;
    Ok(StatusCode::GONE)
}
