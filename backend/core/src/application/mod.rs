// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod shelter;
pub mod lifecycle;
pub mod repository_factory;

pub use lifecycle::StandardShelterService;
pub use shelter::{ShelterPage, ShelterService};
