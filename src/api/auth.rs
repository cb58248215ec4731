// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    auth::{login as authenticate, AuthError},
    error::JsonBody,
    models::{LoginRequest, LoginResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let outcome = authenticate(&state.store, &state.tokens, &request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        role: outcome.role,
        tenant: outcome.tenant_slug,
    }))
}
