// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use utoipa::IntoParams;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VaultAssetQuery {
    pub vault_account_id: String,
    pub asset_id: String,
}

/// Reads a single vault-account asset with a manually signed GET.
#[utoipa::path(
    get,
    path = "/api/vault/asset",
    params(VaultAssetQuery),
    tag = "Vault",
    responses(
        (status = 200, description = "Custody platform asset JSON"),
        (status = 500, description = "Upstream or signing failure")
    )
)]
pub async fn get_vault_asset(
    State(state): State<AppState>,
    Query(params): Query<VaultAssetQuery>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .get_vault_account_asset(&params.vault_account_id, &params.asset_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Failed to get vault account asset");
            ApiError::internal("Failed to get vault account asset")
        })
}
