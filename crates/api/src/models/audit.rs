//! Key and bookkeeping timestamps shared by every entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identity and lifecycle columns common to all tables.
///
/// Flattened into the entity's JSON, so a user serializes as
/// `{"id": 1, "created_at": ..., "username": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Audit<Id> {
    /// Generated primary key.
    pub id: Id,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion marker. Rows with a value here are ignored by lookups.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<Id> Audit<Id> {
    /// Audit fields for a row created at `now`.
    #[must_use]
    pub const fn created(id: Id, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the row has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
