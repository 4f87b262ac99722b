// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Animal Entities
//!
//! Cats and dogs share one record shape. The [`Species`] tag selects which
//! collection of the owning [`crate::domain::shelter::Shelter`] an animal lives
//! in; there is no behavioral difference between the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an animal, drawn from the same sequence as shelter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub i64);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Dog => "dog",
        }
    }

    /// Name of the shelter collection holding this species ("cats" / "dogs").
    pub fn collection_name(&self) -> &'static str {
        match self {
            Species::Cat => "cats",
            Species::Dog => "dogs",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(Species::Cat),
            "dog" => Ok(Species::Dog),
            other => Err(format!("unknown species '{}'", other)),
        }
    }
}

/// A cat or dog owned by exactly one shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub photo: String,
    /// Free-form discriminator supplied by the client (e.g. "cat", "persian").
    #[serde(rename = "type")]
    pub kind: String,
}

impl Animal {
    /// Build an animal from client data under the given identifier.
    ///
    /// Any identifier carried by the draft is ignored.
    pub fn from_draft(id: AnimalId, draft: AnimalDraft) -> Self {
        Self {
            id,
            name: draft.name,
            photo: draft.photo,
            kind: draft.kind,
        }
    }
}

/// Client-supplied animal data, used when adding or replacing an animal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalDraft {
    /// Only honored by full shelter updates, to keep an existing animal's id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnimalId>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub photo: String,

    #[serde(default, rename = "type")]
    pub kind: String,
}

impl AnimalDraft {
    pub fn new(name: impl Into<String>, photo: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            photo: photo.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_parse() {
        assert_eq!("cat".parse::<Species>().unwrap(), Species::Cat);
        assert_eq!("dog".parse::<Species>().unwrap(), Species::Dog);
        assert!("hamster".parse::<Species>().is_err());
    }

    #[test]
    fn test_animal_type_field_name() {
        let animal = Animal {
            id: AnimalId(2),
            name: "Tom".to_string(),
            photo: "x".to_string(),
            kind: "cat".to_string(),
        };

        let json = serde_json::to_value(&animal).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["type"], "cat");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_from_draft_ignores_draft_id() {
        let mut draft = AnimalDraft::new("Rex", "rex.png", "dog");
        draft.id = Some(AnimalId(99));

        let animal = Animal::from_draft(AnimalId(7), draft);
        assert_eq!(animal.id, AnimalId(7));
        assert_eq!(animal.name, "Rex");
    }
}
