// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tenants (organizations) and their service plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::StorageResult;

/// Service tier of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Default for Plan {
    fn default() -> Self {
        Plan::Free
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Free => write!(f, "free"),
            Plan::Pro => write!(f, "pro"),
        }
    }
}

/// Tenant record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredTenant {
    /// Unique tenant identifier (UUID)
    pub id: String,
    /// Unique, URL-safe tenant name
    pub slug: String,
    pub plan: Plan,
    pub created_at: DateTime<Utc>,
}

impl StoredTenant {
    /// New free-plan tenant with a fresh ID.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slug.into(),
            plan: Plan::Free,
            created_at: Utc::now(),
        }
    }
}

/// Tenant lookups and plan changes.
pub trait TenantRepository {
    /// Get a tenant by ID.
    fn tenant(&self, tenant_id: &str) -> StorageResult<Option<StoredTenant>>;

    /// Get a tenant by slug.
    fn tenant_by_slug(&self, slug: &str) -> StorageResult<Option<StoredTenant>>;

    /// Create a tenant. Fails with `AlreadyExists` on a duplicate ID or slug.
    fn insert_tenant(&mut self, tenant: StoredTenant) -> StorageResult<()>;

    /// Set the plan of the tenant with this slug, returning the updated
    /// tenant or `None` if the slug is unknown.
    fn set_plan(&mut self, slug: &str, plan: Plan) -> StorageResult<Option<StoredTenant>>;
}
