// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store with optional JSON snapshot persistence.
//!
//! Shared between requests as `Arc<RwLock<InMemoryStore>>` (see
//! [`crate::state::AppState`]). Mutations take `&mut self`, so anything done
//! under one write guard is atomic with respect to other requests.
//!
//! With a snapshot configured, every mutation writes the whole store to disk
//! synchronously while the caller holds that write guard. The runtime worker
//! blocks for the duration of the write and other requests wait on the lock.
//! This is acceptable for demo-sized data; a larger deployment needs a real
//! database behind the repository traits.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{
    repository::{
        NoteDraft, NotePatch, NoteRepository, Plan, StoredNote, StoredTenant, StoredUser,
        TenantRepository, UserRepository,
    },
    ScopedLookup, SnapshotFile, StorageError, StorageResult, TenantScope,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    tenants: HashMap<String, StoredTenant>,
    users: HashMap<String, StoredUser>,
    notes: HashMap<String, StoredNote>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Tables,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryStore {
    /// Empty, non-persistent store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store persisted to `snapshot`, loading its current contents.
    pub fn with_snapshot(snapshot: SnapshotFile) -> StorageResult<Self> {
        let tables = snapshot.read::<Tables>()?.unwrap_or_default();
        tracing::info!(
            path = %snapshot.path().display(),
            tenants = tables.tenants.len(),
            users = tables.users.len(),
            notes = tables.notes.len(),
            "Loaded store snapshot"
        );
        Ok(Self {
            tables,
            snapshot: Some(snapshot),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.tenants.is_empty() && self.tables.users.is_empty()
    }

    pub fn tenant_count(&self) -> usize {
        self.tables.tenants.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.users.len()
    }

    /// Run a mutation and persist the result.
    ///
    /// With a snapshot configured the mutation runs on a copy that only
    /// replaces the live tables once the snapshot write succeeded. `mutate`
    /// must validate before changing anything when it can fail.
    ///
    /// The snapshot write is blocking file I/O done under the caller's write
    /// guard (see the module docs).
    fn apply<R>(
        &mut self,
        mutate: impl FnOnce(&mut Tables) -> StorageResult<R>,
    ) -> StorageResult<R> {
        match &self.snapshot {
            None => mutate(&mut self.tables),
            Some(snapshot) => {
                let mut next = self.tables.clone();
                let out = mutate(&mut next)?;
                snapshot.write(&next)?;
                self.tables = next;
                Ok(out)
            }
        }
    }
}

impl TenantRepository for InMemoryStore {
    fn tenant(&self, tenant_id: &str) -> StorageResult<Option<StoredTenant>> {
        Ok(self.tables.tenants.get(tenant_id).cloned())
    }

    fn tenant_by_slug(&self, slug: &str) -> StorageResult<Option<StoredTenant>> {
        Ok(self
            .tables
            .tenants
            .values()
            .find(|tenant| tenant.slug == slug)
            .cloned())
    }

    fn insert_tenant(&mut self, tenant: StoredTenant) -> StorageResult<()> {
        self.apply(|tables| {
            if tables.tenants.contains_key(&tenant.id)
                || tables.tenants.values().any(|t| t.slug == tenant.slug)
            {
                return Err(StorageError::AlreadyExists(format!("Tenant {}", tenant.slug)));
            }
            tables.tenants.insert(tenant.id.clone(), tenant);
            Ok(())
        })
    }

    fn set_plan(&mut self, slug: &str, plan: Plan) -> StorageResult<Option<StoredTenant>> {
        if self.tenant_by_slug(slug)?.is_none() {
            return Ok(None);
        }
        self.apply(|tables| {
            Ok(tables
                .tenants
                .values_mut()
                .find(|tenant| tenant.slug == slug)
                .map(|tenant| {
                    tenant.plan = plan;
                    tenant.clone()
                }))
        })
    }
}

impl UserRepository for InMemoryStore {
    fn user_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        Ok(self
            .tables
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    fn insert_user(&mut self, user: StoredUser) -> StorageResult<()> {
        self.apply(|tables| {
            if tables.users.contains_key(&user.id)
                || tables.users.values().any(|u| u.email == user.email)
            {
                return Err(StorageError::AlreadyExists(format!("User {}", user.email)));
            }
            if !tables.tenants.contains_key(&user.tenant_id) {
                return Err(StorageError::IntegrityViolation(format!(
                    "user {} references unknown tenant {}",
                    user.email, user.tenant_id
                )));
            }
            tables.users.insert(user.id.clone(), user);
            Ok(())
        })
    }
}

impl NoteRepository for InMemoryStore {
    fn list_notes(&self, scope: &TenantScope) -> StorageResult<Vec<StoredNote>> {
        let mut notes: Vec<StoredNote> = self
            .tables
            .notes
            .values()
            .filter(|note| scope.admits(*note))
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(notes)
    }

    fn count_notes(&self, scope: &TenantScope) -> StorageResult<usize> {
        Ok(self
            .tables
            .notes
            .values()
            .filter(|note| scope.admits(*note))
            .count())
    }

    fn note(&self, scope: &TenantScope, note_id: &str) -> StorageResult<Option<StoredNote>> {
        Ok(self.tables.notes.get(note_id).cloned().within(scope))
    }

    fn insert_note(
        &mut self,
        scope: &TenantScope,
        author_id: &str,
        draft: NoteDraft,
    ) -> StorageResult<StoredNote> {
        let now = Utc::now();
        let note = StoredNote {
            id: uuid::Uuid::new_v4().to_string(),
            tenant_id: scope.tenant_id().to_string(),
            user_id: author_id.to_string(),
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        };
        self.apply(|tables| {
            tables.notes.insert(note.id.clone(), note.clone());
            Ok(note)
        })
    }

    fn update_note(
        &mut self,
        scope: &TenantScope,
        note_id: &str,
        patch: NotePatch,
    ) -> StorageResult<Option<StoredNote>> {
        if self.note(scope, note_id)?.is_none() {
            return Ok(None);
        }
        self.apply(|tables| {
            Ok(tables.notes.get_mut(note_id).map(|note| {
                patch.apply(note);
                note.clone()
            }))
        })
    }

    fn delete_note(&mut self, scope: &TenantScope, note_id: &str) -> StorageResult<bool> {
        if self.note(scope, note_id)?.is_none() {
            return Ok(false);
        }
        self.apply(|tables| Ok(tables.notes.remove(note_id).is_some()))
    }
}
