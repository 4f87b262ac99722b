// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP Basic authentication and access rules.
//!
//! | Request | Access |
//! |---------|--------|
//! | `GET /shelters`, `GET /health` | anonymous |
//! | `GET /shelters/{id}` | role `USER` |
//! | anything else | any authenticated user |

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

use crate::domain::security::{Access, Role};
use crate::presentation::api::AppState;
use crate::presentation::error::ApiError;

/// Access level required for `method` on `path`.
pub fn required_access(method: &Method, path: &str) -> Access {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if method == Method::GET {
        match segments.as_slice() {
            ["shelters"] | ["health"] => return Access::Anonymous,
            ["shelters", _] => return Access::Role(Role::User),
            _ => {}
        }
    }

    Access::Authenticated
}

/// Decode an `Authorization: Basic <base64(user:password)>` header value.
pub fn parse_basic_credentials(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Authentication middleware applied to every route.
///
/// On success the [`crate::domain::security::Principal`] is stored in the
/// request extensions.
pub async fn require_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let access = required_access(request.method(), request.uri().path());
    if access == Access::Anonymous {
        return Ok(next.run(request).await);
    }

    let unauthorized = || ApiError::Unauthorized {
        realm: state.realm.clone(),
    };

    let (username, password) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_basic_credentials)
        .ok_or_else(unauthorized)?;

    let principal = match state.credentials.authenticate(&username, &password).await {
        Some(principal) => principal,
        None => {
            warn!(username = %username, path = %request.uri().path(), "Rejected credentials");
            return Err(unauthorized());
        }
    };

    if let Access::Role(role) = access {
        if !principal.has_role(role) {
            warn!(username = %principal.username, %role, "Missing required role");
            return Err(ApiError::Forbidden);
        }
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
