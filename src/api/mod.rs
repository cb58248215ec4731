// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware::require_auth, Role},
    models::{
        CreateNoteRequest, DeleteResponse, HealthResponse, IndexResponse, InviteRequest,
        LoginRequest, LoginResponse, UpdateNoteRequest, UpgradeResponse, UserResponse,
    },
    state::AppState,
    storage::{Plan, StoredNote},
};

pub mod auth;
pub mod health;
pub mod invites;
pub mod notes;
pub mod tenants;

/// CORS policy: permissive, or a single origin with credentials.
pub fn cors_layer(frontend_url: Option<&str>) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let Some(origin) = frontend_url else {
        return Ok(CorsLayer::permissive());
    };

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(HeaderValue::from_str(origin)?))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let protected = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{note_id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/tenants/{slug}/upgrade", post(tenants::upgrade_tenant))
        .route("/invite", post(invites::invite_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/login", post(auth::login));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::index,
        health::health,
        auth::login,
        notes::list_notes,
        notes::create_note,
        notes::get_note,
        notes::update_note,
        notes::delete_note,
        tenants::upgrade_tenant,
        invites::invite_user
    ),
    components(
        schemas(
            Role,
            Plan,
            StoredNote,
            LoginRequest,
            LoginResponse,
            CreateNoteRequest,
            UpdateNoteRequest,
            DeleteResponse,
            InviteRequest,
            UserResponse,
            UpgradeResponse,
            HealthResponse,
            IndexResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Auth", description = "Email/password login"),
        (name = "Notes", description = "Tenant-scoped notes"),
        (name = "Tenants", description = "Plan management (admin)"),
        (name = "Invites", description = "User invitation (admin)")
    )
)]
pub struct ApiDoc;
