// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the caller's identity.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is IdentityContext
//! }
//! ```
//!
//! `AdminOnly` additionally requires the admin role and rejects everyone
//! else before the handler body runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{claims::IdentityContext, AuthError, TokenCodec};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Verify the request's bearer token and build the identity from it.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenCodec) -> Result<IdentityContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;
    Ok(IdentityContext::from_claims(claims))
}

/// Extractor for authenticated callers.
///
/// Prefers the identity placed in request extensions by
/// [`super::middleware::require_auth`]; otherwise verifies the header itself.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_notes(
///     Auth(identity): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<StoredNote>>, ApiError> {
///     // identity.tenant_id scopes every store call
/// }
/// ```
#[derive(Debug)]
pub struct Auth(pub IdentityContext);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<IdentityContext>().cloned() {
            return Ok(Auth(identity));
        }

        let identity = authenticate(&parts.headers, &state.tokens)?;
        Ok(Auth(identity))
    }
}

/// Extractor that requires the admin role.
#[derive(Debug)]
pub struct AdminOnly(pub IdentityContext);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(identity) = Auth::from_request_parts(parts, state).await?;

        if !identity.is_admin() {
            tracing::info!(
                user_id = %identity.user_id,
                tenant_id = %identity.tenant_id,
                path = %parts.uri.path(),
                "Admin-only operation rejected"
            );
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(identity))
    }
}
