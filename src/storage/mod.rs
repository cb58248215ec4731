// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Credential store (tenants, users) and note store.
//!
//! ## Layout
//!
//! - `repository` - traits the core depends on, plus the record types
//! - `memory` - `InMemoryStore`, the bundled implementation
//! - `snapshot` - JSON file persistence for `InMemoryStore` (`DATA_DIR`)
//! - `isolation` - `TenantScope`, the only key accepted by note operations
//!
//! ## Snapshot Layout
//!
//! ```text
//! $DATA_DIR/
//!   store.json      # tenants, users (with password hashes), notes
//! ```

use std::io;

pub mod isolation;
pub mod memory;
pub mod repository;
pub mod snapshot;

pub use isolation::{ScopedLookup, TenantScope, TenantScoped};
pub use memory::InMemoryStore;
pub use repository::{
    NoteDraft, NotePatch, NoteRepository, Plan, StoredNote, StoredTenant, StoredUser,
    TenantRepository, UserRepository,
};
pub use snapshot::SnapshotFile;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error while reading or writing the snapshot
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Snapshot could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unique key already taken
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    /// Stored data breaks a cross-record invariant
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
