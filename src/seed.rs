// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Demo tenants and users for local development (`SEED_DEMO_DATA=true`).

use crate::{
    auth::{password::hash_password, AuthError, Role},
    storage::{InMemoryStore, StorageError, StoredTenant, StoredUser, TenantRepository, UserRepository},
};

pub const DEMO_TENANTS: [&str; 2] = ["acme", "globex"];

/// Password of every seeded account.
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to hash demo password: {0}")]
    Hash(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Seed demo data into an empty store.
///
/// Returns `false` without touching anything if the store already holds
/// tenants or users.
pub fn seed_demo_data(store: &mut InMemoryStore, cost: u32) -> Result<bool, SeedError> {
    if !store.is_empty() {
        tracing::info!(
            tenants = store.tenant_count(),
            users = store.user_count(),
            "Store not empty, skipping demo seed"
        );
        return Ok(false);
    }

    let password_hash = hash_password(DEMO_PASSWORD, cost)?;

    for slug in DEMO_TENANTS {
        let tenant = StoredTenant::new(slug);
        store.insert_tenant(tenant.clone())?;

        for (local, role) in [("admin", Role::Admin), ("user", Role::Member)] {
            let email = format!("{local}@{slug}.test");
            store.insert_user(StoredUser::new(&email, password_hash.clone(), role, &tenant.id))?;
        }
    }

    tracing::warn!(
        tenants = ?DEMO_TENANTS,
        "Seeded demo accounts with the publicly known password; do not use in production"
    );
    Ok(true)
}
