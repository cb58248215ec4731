// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::AdminOnly,
    config::AdminScope,
    error::ApiError,
    models::UpgradeResponse,
    state::AppState,
    storage::{Plan, TenantRepository},
};

const TENANT_NOT_FOUND: &str = "Tenant not found";

/// Move a tenant to the pro plan.
///
/// With `ADMIN_SCOPE=own`, another tenant's slug is reported as unknown.
#[utoipa::path(
    post,
    path = "/tenants/{slug}/upgrade",
    params(("slug" = String, Path, description = "Tenant slug")),
    tag = "Tenants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, body = UpgradeResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Tenant not found")
    )
)]
pub async fn upgrade_tenant(
    AdminOnly(identity): AdminOnly,
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UpgradeResponse>, ApiError> {
    let mut store = state.store.write().await;

    let tenant = store
        .tenant_by_slug(&slug)?
        .ok_or_else(|| ApiError::not_found(TENANT_NOT_FOUND))?;

    if state.admin_scope == AdminScope::OwnTenant && tenant.id != identity.tenant_id {
        tracing::info!(
            user_id = %identity.user_id,
            tenant_id = %identity.tenant_id,
            target = %slug,
            "Upgrade of foreign tenant rejected"
        );
        return Err(ApiError::not_found(TENANT_NOT_FOUND));
    }

    let upgraded = store
        .set_plan(&slug, Plan::Pro)?
        .ok_or_else(|| ApiError::not_found(TENANT_NOT_FOUND))?;

    tracing::info!(
        user_id = %identity.user_id,
        tenant = %upgraded.slug,
        own_tenant = upgraded.id == identity.tenant_id,
        "Tenant upgraded to pro"
    );

    Ok(Json(UpgradeResponse {
        success: true,
        plan: upgraded.plan,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::state::test_support::{add_tenant, add_user, test_state};
    use axum::http::StatusCode;

    async fn plan_of(state: &AppState, slug: &str) -> Plan {
        state
            .store
            .read()
            .await
            .tenant_by_slug(slug)
            .unwrap()
            .unwrap()
            .plan
    }

    #[tokio::test]
    async fn admin_upgrades_own_tenant() {
        let state = test_state();
        let acme = add_tenant(&state, "acme").await;
        let admin = add_user(&state, &acme, "admin@acme.test", "pw", Role::Admin).await;

        let Json(response) = upgrade_tenant(AdminOnly(admin), Path("acme".into()), State(state.clone()))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.plan, Plan::Pro);
        assert_eq!(plan_of(&state, "acme").await, Plan::Pro);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let state = test_state();
        let acme = add_tenant(&state, "acme").await;
        let admin = add_user(&state, &acme, "admin@acme.test", "pw", Role::Admin).await;

        let err = upgrade_tenant(AdminOnly(admin), Path("nope".into()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Tenant not found");
    }

    #[tokio::test]
    async fn any_scope_allows_foreign_tenant() {
        let state = test_state();
        let acme = add_tenant(&state, "acme").await;
        add_tenant(&state, "globex").await;
        let admin = add_user(&state, &acme, "admin@acme.test", "pw", Role::Admin).await;

        upgrade_tenant(AdminOnly(admin), Path("globex".into()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(plan_of(&state, "globex").await, Plan::Pro);
    }

    #[tokio::test]
    async fn own_scope_hides_foreign_tenant() {
        let state = test_state().with_admin_scope(AdminScope::OwnTenant);
        let acme = add_tenant(&state, "acme").await;
        add_tenant(&state, "globex").await;
        let admin = add_user(&state, &acme, "admin@acme.test", "pw", Role::Admin).await;

        let err = upgrade_tenant(AdminOnly(admin.clone()), Path("globex".into()), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(plan_of(&state, "globex").await, Plan::Free);

        upgrade_tenant(AdminOnly(admin), Path("acme".into()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(plan_of(&state, "acme").await, Plan::Pro);
    }
}
