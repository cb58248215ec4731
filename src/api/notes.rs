// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note CRUD. Every handler scopes the store call to the caller's tenant;
//! a note owned by another tenant is reported exactly like a missing one.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::{ApiError, JsonBody},
    models::{CreateNoteRequest, DeleteResponse, UpdateNoteRequest},
    quota,
    storage::{NoteRepository, StoredNote, TenantScope},
    state::AppState,
};

const NOTE_NOT_FOUND: &str = "Note not found";

#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [StoredNote]))
)]
pub async fn list_notes(
    Auth(identity): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredNote>>, ApiError> {
    let scope = TenantScope::of(&identity);
    let notes = state.store.read().await.list_notes(&scope)?;
    Ok(Json(notes))
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StoredNote),
        (status = 403, description = "Free plan note limit reached")
    )
)]
pub async fn create_note(
    Auth(identity): Auth,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let mut store = state.store.write().await;
    let note = quota::create_note(&mut *store, &identity, request.into())?;

    tracing::debug!(
        note_id = %note.id,
        tenant_id = %identity.tenant_id,
        user_id = %identity.user_id,
        "Note created"
    );
    Ok(Json(note))
}

#[utoipa::path(
    get,
    path = "/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StoredNote),
        (status = 404, description = "Note not found")
    )
)]
pub async fn get_note(
    Auth(identity): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StoredNote>, ApiError> {
    let scope = TenantScope::of(&identity);
    let note = state.store.read().await.note(&scope, &note_id)?;
    note.map(Json).ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))
}

#[utoipa::path(
    put,
    path = "/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    request_body = UpdateNoteRequest,
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = StoredNote),
        (status = 404, description = "Note not found")
    )
)]
pub async fn update_note(
    Auth(identity): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UpdateNoteRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let scope = TenantScope::of(&identity);
    let note = state
        .store
        .write()
        .await
        .update_note(&scope, &note_id, request.into())?;
    note.map(Json).ok_or_else(|| ApiError::not_found(NOTE_NOT_FOUND))
}

#[utoipa::path(
    delete,
    path = "/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    tag = "Notes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = DeleteResponse),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    Auth(identity): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let scope = TenantScope::of(&identity);
    if !state.store.write().await.delete_note(&scope, &note_id)? {
        return Err(ApiError::not_found(NOTE_NOT_FOUND));
    }
    Ok(Json(DeleteResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{IdentityContext, Role};
    use crate::state::test_support::{add_tenant, add_user, test_state};
    use crate::storage::{Plan, TenantRepository};
    use axum::http::StatusCode;

    fn note_request(title: &str) -> JsonBody<CreateNoteRequest> {
        JsonBody(CreateNoteRequest {
            title: title.into(),
            content: format!("{title} body"),
        })
    }

    async fn two_tenants(state: &AppState) -> (IdentityContext, IdentityContext) {
        let acme = add_tenant(state, "acme").await;
        let globex = add_tenant(state, "globex").await;
        (
            add_user(state, &acme, "a@acme.test", "pw", Role::Member).await,
            add_user(state, &globex, "b@globex.test", "pw", Role::Member).await,
        )
    }

    #[tokio::test]
    async fn create_then_list_and_get() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;

        let Json(created) = create_note(Auth(alice.clone()), State(state.clone()), note_request("first"))
            .await
            .expect("create succeeds");
        assert_eq!(created.tenant_id, alice.tenant_id);
        assert_eq!(created.user_id, alice.user_id);

        let Json(listed) = list_notes(Auth(alice.clone()), State(state.clone())).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let Json(fetched) = get_note(Auth(alice), Path(created.id.clone()), State(state))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn other_tenant_sees_not_found() {
        let state = test_state();
        let (alice, bob) = two_tenants(&state).await;

        let Json(note) = create_note(Auth(alice.clone()), State(state.clone()), note_request("secret"))
            .await
            .unwrap();

        let get = get_note(Auth(bob.clone()), Path(note.id.clone()), State(state.clone())).await;
        assert_eq!(get.unwrap_err().status, StatusCode::NOT_FOUND);

        let update = update_note(
            Auth(bob.clone()),
            Path(note.id.clone()),
            State(state.clone()),
            JsonBody(UpdateNoteRequest {
                title: Some("pwned".into()),
                content: None,
            }),
        )
        .await;
        assert_eq!(update.unwrap_err().status, StatusCode::NOT_FOUND);

        let delete = delete_note(Auth(bob.clone()), Path(note.id.clone()), State(state.clone())).await;
        assert_eq!(delete.unwrap_err().status, StatusCode::NOT_FOUND);

        let Json(bobs) = list_notes(Auth(bob), State(state.clone())).await.unwrap();
        assert!(bobs.is_empty());

        // Untouched for the owner.
        let Json(still_there) = get_note(Auth(alice), Path(note.id), State(state)).await.unwrap();
        assert_eq!(still_there.title, "secret");
    }

    #[tokio::test]
    async fn missing_note_is_not_found() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;

        let err = get_note(Auth(alice), Path("does-not-exist".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Note not found");
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;
        let Json(note) = create_note(Auth(alice.clone()), State(state.clone()), note_request("draft"))
            .await
            .unwrap();

        let Json(updated) = update_note(
            Auth(alice),
            Path(note.id.clone()),
            State(state),
            JsonBody(UpdateNoteRequest {
                title: None,
                content: Some("rewritten".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "draft");
        assert_eq!(updated.content, "rewritten");
        assert_eq!(updated.tenant_id, note.tenant_id);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_note() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;
        let Json(note) = create_note(Auth(alice.clone()), State(state.clone()), note_request("gone"))
            .await
            .unwrap();

        let Json(response) = delete_note(Auth(alice.clone()), Path(note.id.clone()), State(state.clone()))
            .await
            .unwrap();
        assert!(response.success);

        let again = delete_note(Auth(alice), Path(note.id), State(state)).await;
        assert_eq!(again.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fourth_note_on_free_plan_is_forbidden() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;

        for i in 0..3 {
            create_note(Auth(alice.clone()), State(state.clone()), note_request(&format!("n{i}")))
                .await
                .unwrap();
        }

        let err = create_note(Auth(alice.clone()), State(state.clone()), note_request("n3"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Note limit reached. Upgrade to Pro.");

        let Json(listed) = list_notes(Auth(alice), State(state)).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn pro_plan_is_unlimited() {
        let state = test_state();
        let (alice, _) = two_tenants(&state).await;
        state.store.write().await.set_plan("acme", Plan::Pro).unwrap();

        for i in 0..10 {
            create_note(Auth(alice.clone()), State(state.clone()), note_request(&format!("n{i}")))
                .await
                .unwrap();
        }

        let Json(listed) = list_notes(Auth(alice), State(state)).await.unwrap();
        assert_eq!(listed.len(), 10);
    }
}
