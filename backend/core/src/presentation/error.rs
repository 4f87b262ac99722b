// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP error responses.
//!
//! Every failure is rendered as `{"status", "message", "violations"}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::shelter::ShelterError;
use crate::domain::validation::Violation;

/// Errors returned by API handlers and middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Shelter(#[from] ShelterError),

    #[error("Full authentication is required to access this resource")]
    Unauthorized {
        realm: String,
    },

    #[error("Access is denied")]
    Forbidden,

    /// Malformed path or body, rejected before reaching a handler.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Shelter(e) => match e {
                ShelterError::ShelterNotFound(_) | ShelterError::AnimalNotFound { .. } => StatusCode::NOT_FOUND,
                ShelterError::LocationRejected(_) => StatusCode::BAD_REQUEST,
                ShelterError::ValidationFailed(_) | ShelterError::NameTaken(_) => StatusCode::CONFLICT,
                ShelterError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, violations) = match &self {
            Self::Shelter(ShelterError::Repository(e)) => {
                error!("Storage failure while handling request: {}", e);
                ("Internal storage error".to_string(), Vec::new())
            }
            Self::Shelter(ShelterError::ValidationFailed(report)) => {
                (report.message.clone(), report.violations.clone())
            }
            other => (other.to_string(), Vec::new()),
        };

        if status.is_client_error() {
            warn!(status = status.as_u16(), "{}", message);
        }

        let body = ErrorBody {
            status: status.as_u16(),
            message,
            violations,
        };

        let mut response = (status, Json(body)).into_response();
        if let Self::Unauthorized { realm } = &self {
            let challenge = format!("Basic realm=\"{}\"", realm);
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::animal::{AnimalId, Species};
    use crate::domain::repository::RepositoryError;
    use crate::domain::shelter::ShelterId;
    use crate::domain::validation::ValidationReport;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(ShelterError::ShelterNotFound(ShelterId(1))), StatusCode::NOT_FOUND),
            (
                ApiError::from(ShelterError::AnimalNotFound {
                    species: Species::Cat,
                    shelter_id: ShelterId(1),
                    animal_id: AnimalId(2),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ShelterError::LocationRejected("must enter Brasov or Iasi".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(ShelterError::ValidationFailed(ValidationReport::new("bad"))),
                StatusCode::CONFLICT,
            ),
            (ApiError::from(ShelterError::NameTaken("x".into())), StatusCode::CONFLICT),
            (
                ApiError::from(ShelterError::Repository(RepositoryError::Database("down".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(ShelterError::Repository(RepositoryError::Serialization(
                    "unknown species 'hamster'".into(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Rejected {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: "missing field".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = ApiError::Unauthorized {
            realm: "adoptions".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"adoptions\""
        );
    }
}
