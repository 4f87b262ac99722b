// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Identity and Access Contracts
//!
//! Credential verification is delegated to a [`CredentialStore`]; the HTTP
//! layer only decides which [`Access`] level a request needs and asks the store
//! who the caller is. Password hashing sits behind [`PasswordEncoder`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
            Role::Admin => f.write_str("ADMIN"),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Access level required by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Authenticated,
    Role(Role),
}

pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> String;

    /// Must compare in constant time.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the principal when the username exists and the password matches.
    async fn authenticate(&self, username: &str, password: &str) -> Option<Principal>;
}
