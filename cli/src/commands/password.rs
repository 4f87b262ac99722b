// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! `hash-password`: digests accepted by `security.users[].password_hash`

use adoptions_core::domain::security::PasswordEncoder;
use adoptions_core::infrastructure::credentials::Sha256PasswordEncoder;

pub fn hash_password(password: &str) -> String {
    Sha256PasswordEncoder.encode(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_matches_encoder() {
        let hash = hash_password("password");
        assert_eq!(hash.len(), 64);
        assert!(Sha256PasswordEncoder.matches("password", &hash));
    }
}
