// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::StorageResult;
use crate::auth::Role;

/// User record.
///
/// Carries the password hash, so it is never serialized into an API
/// response; see `models::UserResponse`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// Login email (unique, exact match)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub role: Role,
    /// Tenant the user belongs to (immutable)
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            tenant_id: tenant_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// User lookups and creation.
pub trait UserRepository {
    /// Find a user by exact email.
    fn user_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>>;

    /// Create a user. Fails with `AlreadyExists` if the email is taken, and
    /// with `IntegrityViolation` if the tenant does not exist.
    fn insert_user(&mut self, user: StoredUser) -> StorageResult<()>;
}
