// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository traits: the only view of the store the core relies on.
//!
//! Each trait covers one entity type. `InMemoryStore` implements all of them;
//! another backend only has to implement these traits.

pub mod notes;
pub mod tenants;
pub mod users;

pub use notes::{NoteDraft, NotePatch, NoteRepository, StoredNote};
pub use tenants::{Plan, StoredTenant, TenantRepository};
pub use users::{StoredUser, UserRepository};
