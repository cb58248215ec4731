// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access guard for protected routes.
//!
//! `require_auth` verifies the bearer token once per request and stores the
//! resulting [`IdentityContext`] in the request extensions, where the `Auth`
//! and `AdminOnly` extractors pick it up.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/notes", get(list_notes))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{claims::IdentityContext, extractor::authenticate};
use crate::state::AppState;

/// Authentication middleware function.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(identity) => {
            tracing::debug!(
                user_id = %identity.user_id,
                tenant_id = %identity.tenant_id,
                role = %identity.role,
                "Request authenticated"
            );
            request.extensions_mut().insert::<IdentityContext>(identity);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
