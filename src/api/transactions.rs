// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Transaction proxy: injects authentication and relays the custody
//! platform's response verbatim, non-2xx statuses included.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = String,
    tag = "Transactions",
    responses(
        (status = 200, description = "Raw custody platform response"),
        (status = 500, description = "Plain-text internal error")
    )
)]
pub async fn create_transaction(State(state): State<AppState>, body: Bytes) -> Response {
    match state.fireblocks.create_transaction(&body).await {
        Ok((status, upstream_body)) => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                upstream_body,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
