// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Single-step sibling endpoints: one custody call each, relaying the raw
//! upstream response. The loopback deploy transport drives these, and they
//! are usable standalone for manual provisioning.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::{error::ApiError, fireblocks::FireblocksError, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaultAccountRequest {
    pub name: String,
    pub customer_ref_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomerRefIdRequest {
    pub vault_account_id: String,
    pub customer_ref_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub name: String,
    pub customer_ref_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAddressRequest {
    pub vault_account_id: String,
    pub asset_id: String,
    pub description: String,
    pub customer_ref_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAddressDescriptionRequest {
    pub vault_account_id: String,
    pub asset_id: String,
    pub address: String,
    pub tag: String,
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalWalletAssetRequest {
    pub external_wallet_id: String,
    pub asset_id: String,
    pub address: String,
    pub tag: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InternalWalletAssetRequest {
    pub internal_wallet_id: String,
    pub asset_id: String,
    pub address: String,
    pub tag: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaultAssetRequest {
    pub vault_account_id: String,
    pub asset_id: String,
}

fn upstream_failure(operation: &'static str, error: FireblocksError) -> ApiError {
    error!(error = %error, operation, "custody call failed");
    ApiError::internal(format!("Failed to {operation}"))
}

#[utoipa::path(
    post,
    path = "/api/createVaultAccount",
    request_body = CreateVaultAccountRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_vault_account(
    State(state): State<AppState>,
    Json(request): Json<CreateVaultAccountRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_vault_account(&request.name, &request.customer_ref_id)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create vault account", e))
}

#[utoipa::path(
    post,
    path = "/api/setCustomerRefId",
    request_body = SetCustomerRefIdRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn set_customer_ref_id(
    State(state): State<AppState>,
    Json(request): Json<SetCustomerRefIdRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .set_customer_ref_id(&request.vault_account_id, &request.customer_ref_id)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("set customer ref id", e))
}

#[utoipa::path(
    post,
    path = "/api/createExternalWallet",
    request_body = CreateWalletRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_external_wallet(
    State(state): State<AppState>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_external_wallet(&request.name, &request.customer_ref_id)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create external wallet", e))
}

#[utoipa::path(
    post,
    path = "/api/createInternalWallet",
    request_body = CreateWalletRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_internal_wallet(
    State(state): State<AppState>,
    Json(request): Json<CreateWalletRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_internal_wallet(&request.name, &request.customer_ref_id)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create internal wallet", e))
}

#[utoipa::path(
    post,
    path = "/api/generateNewAddress",
    request_body = GenerateAddressRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn generate_new_address(
    State(state): State<AppState>,
    Json(request): Json<GenerateAddressRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .generate_new_address(
            &request.vault_account_id,
            &request.asset_id,
            &request.description,
            &request.customer_ref_id,
        )
        .await
        .map(Json)
        .map_err(|e| upstream_failure("generate new address", e))
}

#[utoipa::path(
    post,
    path = "/api/setAddressDescription",
    request_body = SetAddressDescriptionRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn set_address_description(
    State(state): State<AppState>,
    Json(request): Json<SetAddressDescriptionRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .set_address_description(
            &request.vault_account_id,
            &request.asset_id,
            &request.address,
            &request.tag,
            &request.description,
        )
        .await
        .map(Json)
        .map_err(|e| upstream_failure("set address description", e))
}

#[utoipa::path(
    post,
    path = "/api/createExternalWalletAsset",
    request_body = ExternalWalletAssetRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_external_wallet_asset(
    State(state): State<AppState>,
    Json(request): Json<ExternalWalletAssetRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_external_wallet_asset(
            &request.external_wallet_id,
            &request.asset_id,
            &request.address,
            &request.tag,
        )
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create external wallet asset", e))
}

#[utoipa::path(
    post,
    path = "/api/createInternalWalletAsset",
    request_body = InternalWalletAssetRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_internal_wallet_asset(
    State(state): State<AppState>,
    Json(request): Json<InternalWalletAssetRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_internal_wallet_asset(
            &request.internal_wallet_id,
            &request.asset_id,
            &request.address,
            &request.tag,
        )
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create internal wallet asset", e))
}

#[utoipa::path(
    post,
    path = "/api/createVaultAsset",
    request_body = CreateVaultAssetRequest,
    tag = "Primitives",
    responses((status = 200))
)]
pub async fn create_vault_asset(
    State(state): State<AppState>,
    Json(request): Json<CreateVaultAssetRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fireblocks
        .create_vault_asset(&request.vault_account_id, &request.asset_id)
        .await
        .map(Json)
        .map_err(|e| upstream_failure("create vault asset", e))
}
