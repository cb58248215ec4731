// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    auth::{password::BCRYPT_COST, TokenCodec},
    config::{AdminScope, AppConfig},
    storage::InMemoryStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<TokenCodec>,
    pub admin_scope: AdminScope,
    /// bcrypt work factor for passwords hashed at runtime (invites).
    pub password_cost: u32,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: TokenCodec) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens: Arc::new(tokens),
            admin_scope: AdminScope::default(),
            password_cost: BCRYPT_COST,
        }
    }

    /// Build state from the startup configuration.
    pub fn from_config(store: InMemoryStore, config: &AppConfig) -> Self {
        Self::new(
            store,
            TokenCodec::new(config.jwt_secret.expose(), config.token_ttl),
        )
        .with_admin_scope(config.admin_scope)
    }

    pub fn with_admin_scope(mut self, admin_scope: AdminScope) -> Self {
        self.admin_scope = admin_scope;
        self
    }

    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}
