// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`adoptions-core`)
//!
//! HTTP surface that translates requests into application service calls.
//! No business logic lives here; all real work is delegated to
//! `crate::application`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Axum router and handlers for shelters, cats and dogs |
//! | [`auth`] | HTTP Basic authentication middleware and access rules |
//! | [`error`] | Mapping of domain errors to HTTP responses |
//! | [`extract`] | Path and JSON extractors that reject with [`ApiError`] |

pub mod api;
pub mod auth;
pub mod error;
pub mod extract;

pub use api::{app, AppState};
pub use error::ApiError;
