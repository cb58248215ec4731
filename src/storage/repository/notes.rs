// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notes, always addressed through a [`TenantScope`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{StorageResult, TenantScope, TenantScoped};

/// A note owned by one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    /// Unique note identifier (UUID)
    pub id: String,
    /// Owning tenant, fixed at creation
    pub tenant_id: String,
    /// Author
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantScoped for StoredNote {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

/// Content of a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Apply to a note, bumping `updated_at`.
    pub fn apply(self, note: &mut StoredNote) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        note.updated_at = Utc::now();
    }
}

/// Tenant-scoped note operations.
///
/// There is intentionally no accessor keyed by note ID alone.
pub trait NoteRepository {
    /// All notes of the tenant, oldest first.
    fn list_notes(&self, scope: &TenantScope) -> StorageResult<Vec<StoredNote>>;

    fn count_notes(&self, scope: &TenantScope) -> StorageResult<usize>;

    /// The note, or `None` if missing or owned by another tenant.
    fn note(&self, scope: &TenantScope, note_id: &str) -> StorageResult<Option<StoredNote>>;

    /// Create a note stamped with the scope's tenant.
    fn insert_note(
        &mut self,
        scope: &TenantScope,
        author_id: &str,
        draft: NoteDraft,
    ) -> StorageResult<StoredNote>;

    /// Update a note, or `None` if missing or owned by another tenant.
    fn update_note(
        &mut self,
        scope: &TenantScope,
        note_id: &str,
        patch: NotePatch,
    ) -> StorageResult<Option<StoredNote>>;

    /// Delete a note. Returns `false` if missing or owned by another tenant.
    fn delete_note(&mut self, scope: &TenantScope, note_id: &str) -> StorageResult<bool>;
}
