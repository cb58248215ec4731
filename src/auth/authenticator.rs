// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Email/password login.
//!
//! Unknown emails and wrong passwords fail identically, including in timing:
//! an unknown email is still checked against a throwaway hash.

use std::sync::OnceLock;

use tokio::sync::RwLock;

use super::{
    claims::IdentityContext,
    password::{hash_password, verify_password_blocking, BCRYPT_COST},
    AuthError, Role, TokenCodec,
};
use crate::storage::{StorageError, TenantRepository, UserRepository};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
    /// Slug of the user's tenant (not the full tenant record)
    pub tenant_slug: String,
}

/// Hash compared against when the email is unknown. Computed once; a
/// hashing failure is a server fault, never an empty stand-in.
fn decoy_hash() -> Result<&'static str, AuthError> {
    static DECOY: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DECOY.get() {
        return Ok(hash);
    }
    let hash = hash_password("decoy-password", BCRYPT_COST)?;
    Ok(DECOY.get_or_init(|| hash))
}

/// Compute the decoy hash ahead of the first login.
pub fn prepare_decoy() -> Result<(), AuthError> {
    decoy_hash().map(|_| ())
}

fn store_failure(e: StorageError) -> AuthError {
    AuthError::InternalError(format!("credential store unavailable: {e}"))
}

/// Authenticate `email`/`password` and issue a token.
pub async fn login<S>(
    store: &RwLock<S>,
    tokens: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError>
where
    S: UserRepository + TenantRepository,
{
    let user = store.read().await.user_by_email(email).map_err(store_failure)?;

    let Some(user) = user else {
        let _ = verify_password_blocking(password.to_string(), decoy_hash()?.to_string()).await?;
        tracing::info!(email, "Login failed: unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await? {
        tracing::info!(email, user_id = %user.id, "Login failed: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let tenant = store
        .read()
        .await
        .tenant(&user.tenant_id)
        .map_err(store_failure)?
        .ok_or_else(|| {
            AuthError::InternalError(format!(
                "user {} references missing tenant {}",
                user.id, user.tenant_id
            ))
        })?;

    let identity = IdentityContext {
        user_id: user.id,
        tenant_id: tenant.id,
        role: user.role,
    };
    let token = tokens.issue(&identity)?;

    tracing::info!(
        email,
        user_id = %identity.user_id,
        tenant = %tenant.slug,
        role = %identity.role,
        "Login succeeded"
    );

    Ok(LoginOutcome {
        token,
        role: identity.role,
        tenant_slug: tenant.slug,
    })
}
