// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running. This layer holds no state
/// and no storage, so there is nothing else to check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
