// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the request-scoped identity derived from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claim set carried inside a signed bearer token.
///
/// Field names follow the wire payload `{userId, tenantId, role}` plus the
/// registered `iat`/`exp` timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Authenticated user ID
    pub user_id: String,
    /// Tenant the user belongs to
    pub tenant_id: String,
    /// User's role within the tenant
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Identity of the caller for the duration of one request.
///
/// Only ever built from a verified token. Handlers and storage take the
/// tenant and user from here, never from request bodies or query strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityContext {
    pub user_id: String,
    pub tenant_id: String,
    pub role: Role,
}

impl IdentityContext {
    /// Build the identity from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            tenant_id: claims.tenant_id,
            role: claims.role,
        }
    }

    /// Check if the caller is a tenant admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
