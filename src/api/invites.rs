// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    auth::{password::hash_password_blocking, AdminOnly},
    error::{ApiError, JsonBody},
    models::{InviteRequest, UserResponse},
    state::AppState,
    storage::{StorageError, StoredUser, UserRepository},
};

/// Password given to every invited user until they change it.
pub const DEFAULT_INVITE_PASSWORD: &str = "password";

/// Create a user in the inviting admin's tenant.
#[utoipa::path(
    post,
    path = "/invite",
    request_body = InviteRequest,
    tag = "Invites",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = UserResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn invite_user(
    AdminOnly(identity): AdminOnly,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<InviteRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let password_hash =
        hash_password_blocking(DEFAULT_INVITE_PASSWORD.to_string(), state.password_cost).await?;
    let user = StoredUser::new(&request.email, password_hash, request.role, &identity.tenant_id);

    match state.store.write().await.insert_user(user.clone()) {
        Ok(()) => {}
        Err(StorageError::AlreadyExists(_)) => {
            return Err(ApiError::conflict("User already exists"));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::warn!(
        invited_by = %identity.user_id,
        tenant_id = %identity.tenant_id,
        user_id = %user.id,
        role = %user.role,
        "Invited user created with the default password"
    );

    Ok(Json(user.into()))
}
