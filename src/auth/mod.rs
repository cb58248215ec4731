// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Login, bearer tokens, and the per-request identity for the notes API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{email, password}` to `/login`
//! 2. `authenticator::login` checks the bcrypt hash and issues an HS256 JWT
//!    carrying `{userId, tenantId, role}`
//! 3. Client sends `Authorization: Bearer <token>` on every other request
//! 4. `middleware::require_auth` verifies signature and expiry and stores
//!    the `IdentityContext` for the request
//! 5. Handlers read it through the `Auth` / `AdminOnly` extractors
//!
//! ## Security
//!
//! - Tenant and user IDs come only from the verified token
//! - Unknown email and wrong password produce the same 401
//! - Clock skew tolerance is 60 seconds

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod token;

pub use authenticator::{login, prepare_decoy, LoginOutcome};
pub use claims::{IdentityContext, TokenClaims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::Role;
pub use token::TokenCodec;
