// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tenant isolation for every note access.
//!
//! Note reads and writes are keyed by `(record_id, TenantScope)`. A record
//! stored under another tenant is indistinguishable from a missing one.

use crate::auth::IdentityContext;

/// Records that belong to exactly one tenant.
pub trait TenantScoped {
    /// Tenant the record was stamped with at creation.
    fn tenant_id(&self) -> &str;
}

/// The tenant a request is allowed to see.
///
/// Can only be built from a verified [`IdentityContext`], so a tenant ID
/// taken from a request body or URL never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    tenant_id: String,
}

impl TenantScope {
    pub fn of(identity: &IdentityContext) -> Self {
        Self {
            tenant_id: identity.tenant_id.clone(),
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Whether the record lives inside this scope.
    pub fn admits<T: TenantScoped + ?Sized>(&self, record: &T) -> bool {
        record.tenant_id() == self.tenant_id
    }
}

/// Drops lookup results that belong to a different tenant.
pub trait ScopedLookup<T> {
    fn within(self, scope: &TenantScope) -> Option<T>;
}

impl<T: TenantScoped> ScopedLookup<T> for Option<T> {
    fn within(self, scope: &TenantScope) -> Option<T> {
        self.filter(|record| scope.admits(record))
    }
}
