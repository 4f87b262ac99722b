// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Adoptions CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Server wiring and configuration commands for the `adoptions` binary

pub mod commands;
pub mod daemon;
pub mod logging;
