// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! The shelter aggregate, its animals, validation rules, repository and
//! identity contracts, and the service configuration manifest. Nothing here
//! knows about HTTP.

pub mod animal;
pub mod config;
pub mod repository;
pub mod security;
pub mod shelter;
pub mod validation;
