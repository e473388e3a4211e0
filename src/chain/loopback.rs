// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Loopback transport: executes chain steps by calling this service's own
//! single-step sibling endpoints over local HTTP instead of talking to the
//! custody platform directly.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use super::ChainError;

#[derive(Debug, Clone)]
pub struct LoopbackClient {
    base_url: String,
    http: Client,
}

impl LoopbackClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ChainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ChainError::Sibling(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn create_vault_account(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createVaultAccount",
            &json!({ "name": name, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn set_customer_ref_id(
        &self,
        vault_account_id: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/setCustomerRefId",
            &json!({ "vaultAccountId": vault_account_id, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn create_external_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createExternalWallet",
            &json!({ "name": name, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn create_internal_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createInternalWallet",
            &json!({ "name": name, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn generate_new_address(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        description: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/generateNewAddress",
            &json!({
                "vaultAccountId": vault_account_id,
                "assetId": asset_id,
                "description": description,
                "customerRefId": customer_ref_id
            }),
        )
        .await
    }

    pub async fn set_address_description(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
        description: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/setAddressDescription",
            &json!({
                "vaultAccountId": vault_account_id,
                "assetId": asset_id,
                "address": address,
                "tag": tag,
                "description": description
            }),
        )
        .await
    }

    pub async fn create_external_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createExternalWalletAsset",
            &json!({
                "externalWalletId": wallet_id,
                "assetId": asset_id,
                "address": address,
                "tag": tag
            }),
        )
        .await
    }

    pub async fn create_internal_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createInternalWalletAsset",
            &json!({
                "internalWalletId": wallet_id,
                "assetId": asset_id,
                "address": address,
                "tag": tag
            }),
        )
        .await
    }

    pub async fn create_vault_asset(
        &self,
        vault_account_id: &str,
        asset_id: &str,
    ) -> Result<Value, ChainError> {
        self.post(
            "/createVaultAsset",
            &json!({ "vaultAccountId": vault_account_id, "assetId": asset_id }),
        )
        .await
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value, ChainError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await
            .map_err(|e| ChainError::Sibling(format!("POST {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Sibling(format!(
                "POST {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ChainError::Sibling(format!("POST {path} invalid JSON: {e}")))
    }
}
