//! Record types held by the store.
//!
//! `NewSvgRecord` is what the submission service hands to a store; `SvgRecord`
//! is what comes back once the store has assigned an id and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::svg::SvgMetadata;

/// A stored SVG submission. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgRecord {
    pub id: u64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub element_count: usize,
    /// UTF-8 byte length of `content`.
    pub size: usize,
    pub created_at: DateTime<Utc>,
}

/// An SVG submission that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSvgRecord {
    content: String,
    metadata: SvgMetadata,
}

impl NewSvgRecord {
    /// Pair raw markup with the metadata extracted from it.
    pub fn new(content: impl Into<String>, metadata: SvgMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &SvgMetadata {
        &self.metadata
    }

    /// Finish the record with the identity and timestamp chosen by the store.
    pub(crate) fn into_stored(self, id: u64, created_at: DateTime<Utc>) -> SvgRecord {
        SvgRecord {
            id,
            width: self.metadata.width,
            height: self.metadata.height,
            element_count: self.metadata.element_count,
            size: self.metadata.size,
            content: self.content,
            created_at,
        }
    }
}

/// A user account. Carried by the storage interface; nothing in the SVG flow reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// A user account before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn into_stored(self, id: u64) -> UserRecord {
        UserRecord {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
