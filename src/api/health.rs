// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::models::{HealthResponse, IndexResponse};

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, body = IndexResponse))
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Multi-Tenant Notes API. See /health for status.".to_string(),
    })
}

/// Liveness check handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
