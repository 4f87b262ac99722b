// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Credential Store
//!
//! Configuration-backed users for HTTP Basic authentication. Passwords are
//! stored as hex SHA-256 digests and compared in constant time (`subtle`).

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::domain::config::SecurityConfig;
use crate::domain::security::{CredentialStore, PasswordEncoder, Principal, Role};

/// Hex-encoded SHA-256 password digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordEncoder;

impl PasswordEncoder for Sha256PasswordEncoder {
    fn encode(&self, raw: &str) -> String {
        hex::encode(Sha256::digest(raw.as_bytes()))
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        let candidate = self.encode(raw);
        candidate
            .as_bytes()
            .ct_eq(encoded.to_ascii_lowercase().as_bytes())
            .into()
    }
}

struct StoredUser {
    password_hash: String,
    roles: Vec<Role>,
}

pub struct InMemoryCredentialStore {
    users: HashMap<String, StoredUser>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl InMemoryCredentialStore {
    pub fn new(encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self {
            users: HashMap::new(),
            encoder,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        let mut store = Self::new(Arc::new(Sha256PasswordEncoder));
        for user in &config.users {
            store.insert_hashed(&user.username, &user.password_hash, user.roles.clone());
        }
        store
    }

    pub fn insert_hashed(&mut self, username: &str, password_hash: &str, roles: Vec<Role>) {
        self.users.insert(
            username.to_string(),
            StoredUser {
                password_hash: password_hash.to_string(),
                roles,
            },
        );
    }

    /// Register a user from a plain-text password.
    pub fn with_user(mut self, username: &str, password: &str, roles: Vec<Role>) -> Self {
        let hash = self.encoder.encode(password);
        self.insert_hashed(username, &hash, roles);
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        let Some(user) = self.users.get(username) else {
            debug!(username, "Unknown user");
            return None;
        };

        if !self.encoder.matches(password, &user.password_hash) {
            debug!(username, "Password mismatch");
            return None;
        }

        Some(Principal {
            username: username.to_string(),
            roles: user.roles.clone(),
        })
    }
}
