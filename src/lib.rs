// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tenant Notes - Multi-Tenant Notes API
//!
//! An HTTP service where users of isolated tenants log in with email and
//! password, manage their tenant's notes under a plan-based quota, and
//! tenant admins invite users and upgrade plans.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Login, bearer tokens (HS256 JWT), role gate
//! - `quota` - Plan-based note limits
//! - `storage` - Tenant-scoped store with optional JSON snapshots

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod quota;
pub mod seed;
pub mod state;
pub mod storage;
