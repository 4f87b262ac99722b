// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Shelter Validation
//!
//! Validation runs before any mutation of a shelter aggregate. Field and
//! content rules never fail fast: every violation is collected into a
//! [`ValidationReport`] and the request fails once with the whole list.
//! The location whitelist is checked afterwards and has its own error.
//!
//! | Rule set | Applied on | Failure |
//! |----------|------------|---------|
//! | field rules | shelter create/update, animal add/replace | `ValidationFailed` |
//! | content rules | shelter create/update, when enabled | `ValidationFailed` |
//! | location whitelist | shelter create/update | `LocationRejected` |

use serde::{Deserialize, Serialize};

use crate::domain::animal::AnimalDraft;
use crate::domain::shelter::{ShelterDraft, ShelterError};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Collects violations and converts them into a single failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub message: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> Result<(), ShelterError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ShelterError::ValidationFailed(self))
        }
    }
}

/// Whitelist of accepted shelter locations.
///
/// A location is accepted when its lower-cased form contains the lower-cased
/// form of at least one accepted name.
#[derive(Debug, Clone)]
pub struct LocationPolicy {
    accepted: Vec<String>,
    needles: Vec<String>,
}

impl LocationPolicy {
    pub fn new(accepted: Vec<String>) -> Self {
        let needles = accepted.iter().map(|name| name.to_lowercase()).collect();
        Self { accepted, needles }
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    pub fn check(&self, location: &str) -> Result<(), ShelterError> {
        let location = location.to_lowercase();
        if self.needles.iter().any(|needle| location.contains(needle.as_str())) {
            Ok(())
        } else {
            Err(ShelterError::LocationRejected(self.rejection_message()))
        }
    }

    /// "must enter Brasov or Iasi", "must enter A, B or C"
    pub fn rejection_message(&self) -> String {
        match self.accepted.as_slice() {
            [] => "no shelter locations are accepted".to_string(),
            [only] => format!("must enter {}", only),
            [init @ .., last] => format!("must enter {} or {}", init.join(", "), last),
        }
    }
}

impl Default for LocationPolicy {
    fn default() -> Self {
        Self::new(vec!["Brasov".to_string(), "Iasi".to_string()])
    }
}

/// Field rules for a shelter payload, including its initial animals.
pub fn check_shelter_fields(draft: &ShelterDraft, report: &mut ValidationReport) {
    if draft.name.trim().is_empty() {
        report.push("name", "must not be blank");
    }
    if draft.location.trim().is_empty() {
        report.push("location", "must not be blank");
    }
    for (index, cat) in draft.cats.iter().enumerate() {
        check_animal_fields_at(&format!("cats[{}]", index), cat, report);
    }
    for (index, dog) in draft.dogs.iter().enumerate() {
        check_animal_fields_at(&format!("dogs[{}]", index), dog, report);
    }
}

/// Business rules for shelter content. Only enforced when configured.
pub fn check_shelter_content(draft: &ShelterDraft, report: &mut ValidationReport) {
    if draft.dogs.is_empty() {
        report.push("dogs", "Minimum 1 dog");
    }
    if draft.name.contains('_') {
        report.push("name", "No underscore in name");
    }
}

pub fn validate_animal(draft: &AnimalDraft) -> Result<(), ShelterError> {
    let mut report = ValidationReport::new("Animal validation failed");
    check_animal_fields_at("", draft, &mut report);
    report.into_result()
}

fn check_animal_fields_at(prefix: &str, draft: &AnimalDraft, report: &mut ValidationReport) {
    if draft.name.trim().is_empty() {
        let field = if prefix.is_empty() {
            "name".to_string()
        } else {
            format!("{}.name", prefix)
        };
        report.push(field, "must not be blank");
    }
}

/// Validation pipeline applied to shelter create and update requests.
#[derive(Debug, Clone, Default)]
pub struct ShelterValidator {
    location: LocationPolicy,
    enforce_content_rules: bool,
}

impl ShelterValidator {
    pub fn new(location: LocationPolicy, enforce_content_rules: bool) -> Self {
        Self {
            location,
            enforce_content_rules,
        }
    }

    pub fn location_policy(&self) -> &LocationPolicy {
        &self.location
    }

    pub fn validate(&self, draft: &ShelterDraft) -> Result<(), ShelterError> {
        let mut report = ValidationReport::new("Shelter validation failed");
        check_shelter_fields(draft, &mut report);
        if self.enforce_content_rules {
            check_shelter_content(draft, &mut report);
        }
        report.into_result()?;

        self.location.check(&draft.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, location: &str) -> ShelterDraft {
        ShelterDraft {
            name: name.to_string(),
            location: location.to_string(),
            cats: vec![],
            dogs: vec![],
        }
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let policy = LocationPolicy::default();
        assert!(policy.check("Brasov").is_ok());
        assert!(policy.check("str. Lunga 12, BRASOV").is_ok());
        assert!(policy.check("iasi").is_ok());
        assert!(policy.check("Cluj-Napoca").is_err());
    }

    #[test]
    fn test_location_rejection_message() {
        let policy = LocationPolicy::default();
        match policy.check("Cluj") {
            Err(ShelterError::LocationRejected(message)) => {
                assert_eq!(message, "must enter Brasov or Iasi");
            }
            other => panic!("expected LocationRejected, got {:?}", other),
        }

        let three = LocationPolicy::new(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(three.rejection_message(), "must enter A, B or C");
    }

    #[test]
    fn test_field_rules_collect_every_violation() {
        let mut shelter = draft(" ", "");
        shelter.cats.push(AnimalDraft::new("", "p", "cat"));
        shelter.dogs.push(AnimalDraft::new("Rex", "p", "dog"));

        let err = ShelterValidator::default().validate(&shelter).unwrap_err();
        let ShelterError::ValidationFailed(report) = err else {
            panic!("expected ValidationFailed");
        };
        let fields: Vec<&str> = report.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "location", "cats[0].name"]);
    }

    #[test]
    fn test_content_rules_only_when_enabled() {
        let shelter = draft("my_shelter", "Iasi");

        assert!(ShelterValidator::default().validate(&shelter).is_ok());

        let strict = ShelterValidator::new(LocationPolicy::default(), true);
        let ShelterError::ValidationFailed(report) = strict.validate(&shelter).unwrap_err() else {
            panic!("expected ValidationFailed");
        };
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].message, "Minimum 1 dog");
        assert_eq!(report.violations[1].field, "name");
    }

    #[test]
    fn test_field_violations_reported_before_location() {
        let err = ShelterValidator::default().validate(&draft("", "Cluj")).unwrap_err();
        assert!(matches!(err, ShelterError::ValidationFailed(_)));
    }

    #[test]
    fn test_validate_animal() {
        assert!(validate_animal(&AnimalDraft::new("Tom", "x", "cat")).is_ok());
        assert!(matches!(
            validate_animal(&AnimalDraft::new("  ", "x", "cat")),
            Err(ShelterError::ValidationFailed(_))
        ));
    }
}
