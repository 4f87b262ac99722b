// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Server mode implementation
//!
//! Handles:
//! - Building the service graph from configuration
//! - Prometheus exporter startup
//! - Graceful shutdown

pub mod server;

pub use server::{build_state, start_server, ServeOverrides};
