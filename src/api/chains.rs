// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Chain handlers. Each runs one fixed call sequence under the configured
//! deadline and collapses every failure into a generic 500; per-step
//! diagnostics stay in the server log.

use std::{future::Future, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{
    chain::{
        loopback::LoopbackClient, run_escrow_chain, run_provisioning_chain, ChainError,
        ChainProfile, ChainTransport,
    },
    error::ApiError,
    models::{ChainRequest, DeploySummary, EscrowResponse, ProvisioningResponse},
    state::AppState,
};

async fn run_with_deadline<T>(
    deadline: Duration,
    chain: impl Future<Output = Result<T, ChainError>>,
) -> Result<T, ChainError> {
    // On expiry the chain future is dropped, cancelling the in-flight
    // outbound call; later steps never start.
    tokio::time::timeout(deadline, chain)
        .await
        .unwrap_or(Err(ChainError::Timeout))
}

#[utoipa::path(
    post,
    path = "/api/chains/trust",
    request_body = ChainRequest,
    tag = "Chains",
    responses(
        (status = 200, body = ProvisioningResponse),
        (status = 500, description = "Any step failed; no partial results")
    )
)]
pub async fn trust_chain(
    State(state): State<AppState>,
    Json(request): Json<ChainRequest>,
) -> Result<Json<ProvisioningResponse>, ApiError> {
    let transport = ChainTransport::Direct(state.fireblocks.clone());
    run_with_deadline(
        state.config.chain_timeout,
        run_provisioning_chain(&transport, ChainProfile::Trust, &request),
    )
    .await
    .map(Json)
    .map_err(|e| {
        error!(error = %e, "Create Trust Action chain failed");
        ApiError::internal("Create Trust Action chain failed")
    })
}

#[utoipa::path(
    post,
    path = "/api/chains/escrow",
    request_body = ChainRequest,
    tag = "Chains",
    responses(
        (status = 200, body = EscrowResponse),
        (status = 500, description = "Any step failed; no partial results")
    )
)]
pub async fn escrow_chain(
    State(state): State<AppState>,
    Json(request): Json<ChainRequest>,
) -> Result<Json<EscrowResponse>, ApiError> {
    run_with_deadline(
        state.config.chain_timeout,
        run_escrow_chain(&state.fireblocks, &request),
    )
    .await
    .map(Json)
    .map_err(|e| {
        error!(error = %e, "Create Escrow Action chain failed");
        ApiError::internal("Create Escrow Action chain failed")
    })
}

#[utoipa::path(
    post,
    path = "/api/chains/deploy-direct",
    request_body = ChainRequest,
    tag = "Chains",
    responses(
        (status = 200, body = ProvisioningResponse),
        (status = 500, description = "Any step failed; no partial results")
    )
)]
pub async fn deploy_direct_chain(
    State(state): State<AppState>,
    Json(request): Json<ChainRequest>,
) -> Result<Json<ProvisioningResponse>, ApiError> {
    let transport = ChainTransport::Direct(state.fireblocks.clone());
    run_with_deadline(
        state.config.chain_timeout,
        run_provisioning_chain(&transport, ChainProfile::Deployment, &request),
    )
    .await
    .map(Json)
    .map_err(|e| {
        error!(error = %e, "Create Deployment Action chain failed");
        ApiError::internal("Create Deployment Action chain failed")
    })
}

/// Loopback deploy chain: same sequence, but every step goes through this
/// service's sibling single-step endpoints. Accepts any method and works
/// without a body (placeholder inputs), matching its historical contract.
#[utoipa::path(
    post,
    path = "/api/chains/deploy",
    tag = "Chains",
    responses(
        (status = 200, body = DeploySummary),
        (status = 500, description = "Step failure, `{message, error}` body")
    )
)]
pub async fn deploy_chain(
    State(state): State<AppState>,
    request: Option<Json<ChainRequest>>,
) -> Response {
    let request = match request {
        Some(Json(request)) => request,
        None => placeholder_deploy_request(),
    };

    let loopback = match LoopbackClient::new(&state.config.sibling_base_url) {
        Ok(client) => client,
        Err(e) => return deploy_failure(&e),
    };
    let transport = ChainTransport::Loopback(loopback);

    match run_with_deadline(
        state.config.chain_timeout,
        run_provisioning_chain(&transport, ChainProfile::Deployment, &request),
    )
    .await
    {
        Ok(outcome) => Json(DeploySummary {
            message: "Deploy chain completed successfully".to_string(),
            vault_account_id: outcome.vault_account_id,
            customer_ref_id: request.customer_ref_id,
            external_wallet_id: outcome.external_wallet_id,
            internal_wallet_id: outcome.internal_wallet_id,
        })
        .into_response(),
        Err(e) => deploy_failure(&e),
    }
}

fn deploy_failure(error: &ChainError) -> Response {
    error!(error = %error, "Deploy chain error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "Error executing deploy chain",
            "error": error.to_string()
        })),
    )
        .into_response()
}

fn placeholder_deploy_request() -> ChainRequest {
    ChainRequest {
        name: "Deployment".to_string(),
        customer_ref_id: Uuid::new_v4().to_string(),
        asset_id: "ETH".to_string(),
        description: "Example description".to_string(),
        tag: String::new(),
    }
}
