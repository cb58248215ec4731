// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Plan-based note quota.
//!
//! Free tenants hold at most [`FREE_PLAN_NOTE_LIMIT`] notes; pro tenants are
//! unlimited. [`create_note`] resolves the tenant, counts and inserts through
//! one `&mut` borrow of the store. Callers hold the store's write lock across
//! the call, so concurrent creations for one tenant cannot overshoot.

use crate::{
    auth::IdentityContext,
    storage::{
        NoteDraft, NoteRepository, Plan, StorageError, StoredNote, TenantRepository, TenantScope,
    },
};

/// Maximum number of notes a free-plan tenant may hold.
pub const FREE_PLAN_NOTE_LIMIT: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum QuotaError {
    #[error("Note limit reached. Upgrade to Pro.")]
    Exceeded { limit: usize },
    /// The identity points at a tenant that no longer exists.
    #[error("tenant {0} referenced by identity does not exist")]
    TenantMissing(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Note cap for a plan, `None` meaning unlimited.
pub fn note_limit(plan: Plan) -> Option<usize> {
    match plan {
        Plan::Free => Some(FREE_PLAN_NOTE_LIMIT),
        Plan::Pro => None,
    }
}

/// Create a note for the caller's tenant if its plan allows another one.
///
/// Nothing is written when the quota check fails.
pub fn create_note<S>(
    store: &mut S,
    identity: &IdentityContext,
    draft: NoteDraft,
) -> Result<StoredNote, QuotaError>
where
    S: TenantRepository + NoteRepository,
{
    let tenant = store
        .tenant(&identity.tenant_id)?
        .ok_or_else(|| QuotaError::TenantMissing(identity.tenant_id.clone()))?;
    let scope = TenantScope::of(identity);

    if let Some(limit) = note_limit(tenant.plan) {
        let existing = store.count_notes(&scope)?;
        if existing >= limit {
            tracing::info!(
                tenant_id = %tenant.id,
                tenant = %tenant.slug,
                existing,
                limit,
                "Note creation rejected by plan quota"
            );
            return Err(QuotaError::Exceeded { limit });
        }
    }

    Ok(store.insert_note(&scope, &identity.user_id, draft)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;
    use crate::auth::Role;
    use crate::storage::{InMemoryStore, StoredTenant};

    fn setup(plan: Plan) -> (InMemoryStore, IdentityContext) {
        let mut store = InMemoryStore::new();
        let tenant = StoredTenant::new("acme");
        store.insert_tenant(tenant.clone()).unwrap();
        if plan == Plan::Pro {
            store.set_plan("acme", Plan::Pro).unwrap();
        }
        let identity = IdentityContext {
            user_id: "user-1".to_string(),
            tenant_id: tenant.id,
            role: Role::Member,
        };
        (store, identity)
    }

    fn draft(n: usize) -> NoteDraft {
        NoteDraft {
            title: format!("note {n}"),
            content: String::new(),
        }
    }

    #[test]
    fn plan_limits() {
        assert_eq!(note_limit(Plan::Free), Some(3));
        assert_eq!(note_limit(Plan::Pro), None);
    }

    #[test]
    fn free_plan_stops_at_three() {
        let (mut store, identity) = setup(Plan::Free);
        for n in 0..3 {
            create_note(&mut store, &identity, draft(n)).expect("within quota");
        }

        let result = create_note(&mut store, &identity, draft(3));
        assert!(matches!(result, Err(QuotaError::Exceeded { limit: 3 })));
        assert_eq!(store.count_notes(&TenantScope::of(&identity)).unwrap(), 3);
    }

    #[test]
    fn pro_plan_is_unlimited() {
        let (mut store, identity) = setup(Plan::Pro);
        for n in 0..10 {
            create_note(&mut store, &identity, draft(n)).expect("pro has no cap");
        }
        assert_eq!(store.count_notes(&TenantScope::of(&identity)).unwrap(), 10);
    }

    #[test]
    fn upgrade_lifts_the_cap() {
        let (mut store, identity) = setup(Plan::Free);
        for n in 0..3 {
            create_note(&mut store, &identity, draft(n)).unwrap();
        }
        assert!(create_note(&mut store, &identity, draft(3)).is_err());

        store.set_plan("acme", Plan::Pro).unwrap();
        assert!(create_note(&mut store, &identity, draft(3)).is_ok());
    }

    #[test]
    fn quota_is_counted_per_tenant() {
        let (mut store, acme_identity) = setup(Plan::Free);
        let globex = StoredTenant::new("globex");
        store.insert_tenant(globex.clone()).unwrap();
        let globex_identity = IdentityContext {
            user_id: "user-2".to_string(),
            tenant_id: globex.id,
            role: Role::Member,
        };

        for n in 0..3 {
            create_note(&mut store, &acme_identity, draft(n)).unwrap();
        }
        assert!(create_note(&mut store, &globex_identity, draft(0)).is_ok());
    }

    #[test]
    fn unknown_tenant_is_reported() {
        let mut store = InMemoryStore::new();
        let identity = IdentityContext {
            user_id: "user-1".to_string(),
            tenant_id: "deleted-tenant".to_string(),
            role: Role::Member,
        };
        let result = create_note(&mut store, &identity, draft(0));
        assert!(matches!(result, Err(QuotaError::TenantMissing(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creations_respect_the_cap() {
        let (store, identity) = setup(Plan::Free);
        let store = Arc::new(RwLock::new(store));

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let store = Arc::clone(&store);
                let identity = identity.clone();
                tokio::spawn(async move {
                    let mut guard = store.write().await;
                    create_note(&mut *guard, &identity, draft(n)).is_ok()
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, FREE_PLAN_NOTE_LIMIT);
        let count = store
            .read()
            .await
            .count_notes(&TenantScope::of(&identity))
            .unwrap();
        assert_eq!(count, FREE_PLAN_NOTE_LIMIT);
    }
}
