//! The pet record under test.
//!
//! Field names follow the remote JSON representation (`photoUrls` on the
//! wire). Everything except the identifier is optional when decoding, since
//! the demo API happily stores partial records.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a pet
pub type PetId = i64;

/// Identifier shared by every scenario unless configuration overrides it
pub const DEFAULT_PET_ID: PetId = 1_234_567_890;

/// Identifier used for the category and tag attached to suite payloads
pub const BREED_ID: i64 = 10;

/// Pet category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: i64,
    /// Category name
    pub name: String,
}

/// Pet tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier
    pub id: i64,
    /// Tag name
    pub name: String,
}

/// A pet as exchanged with the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Identifier, constant across a scenario
    pub id: PetId,
    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Photo URLs
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Lifecycle status, e.g. "available", "pending" or "sold"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Pet {
    /// Creates a pet with the given name and status and a placeholder photo URL.
    pub fn new(id: PetId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            category: None,
            name: name.into(),
            photo_urls: vec!["string".to_string()],
            tags: Vec::new(),
            status: Some(status.into()),
        }
    }

    /// Files the pet under a breed: sets the category and replaces the tags
    /// with a single tag of the same name.
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        let breed = breed.into();
        self.category = Some(Category {
            id: BREED_ID,
            name: breed.clone(),
        });
        self.tags = vec![Tag {
            id: BREED_ID,
            name: breed,
        }];
        self
    }

    /// Returns the status, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// True when the name and status match exactly (case-sensitive).
    pub fn matches(&self, name: &str, status: &str) -> bool {
        self.name == name && self.status() == Some(status)
    }
}
