// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the adoptions CLI

pub mod config;
pub mod password;

pub use self::config::ConfigCommand;
