// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive `ToSchema`
//! for OpenAPI documentation and use camelCase field names on the wire.
//!
//! Request bodies never carry identity: any `tenantId`/`userId` a client
//! sends is an unknown field and is ignored. The tenant always comes from
//! the verified token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::Role,
    storage::{NoteDraft, NotePatch, Plan, StoredUser},
};

// =============================================================================
// Auth Models
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub role: Role,
    /// Tenant slug
    pub tenant: String,
}

// =============================================================================
// Note Models
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl From<CreateNoteRequest> for NoteDraft {
    fn from(request: CreateNoteRequest) -> Self {
        NoteDraft {
            title: request.title,
            content: request.content,
        }
    }
}

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdateNoteRequest> for NotePatch {
    fn from(request: UpdateNoteRequest) -> Self {
        NotePatch {
            title: request.title,
            content: request.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
}

// =============================================================================
// Admin Models
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InviteRequest {
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// A user as returned by the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub tenant_id: String,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            role: user.role,
            tenant_id: user.tenant_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UpgradeResponse {
    pub success: bool,
    pub plan: Plan,
}

// =============================================================================
// Service Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
}
