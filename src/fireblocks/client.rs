// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Typed client over the custody REST API. One async method per remote call
//! the chains perform; payload field names follow the platform's API.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::{FireblocksError, RequestSigner};
use crate::config::Config;

pub struct FireblocksClient {
    base_url: String,
    signer: RequestSigner,
    http: Client,
}

impl FireblocksClient {
    pub fn new(config: &Config) -> Result<Self, FireblocksError> {
        let signer = RequestSigner::new(&config.api_key, &config.private_key_pem)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| FireblocksError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            signer,
            http,
        })
    }

    pub async fn create_vault_account(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            "/v1/vault/accounts",
            &json!({
                "name": name,
                "hiddenOnUI": false,
                "customerRefId": customer_ref_id,
                "autoFuel": false
            }),
        )
        .await
    }

    pub async fn set_customer_ref_id(
        &self,
        vault_account_id: &str,
        customer_ref_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/vault/accounts/{vault_account_id}/set_customer_ref_id"),
            &json!({ "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn create_external_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            "/v1/external_wallets",
            &json!({ "name": name, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn create_internal_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            "/v1/internal_wallets",
            &json!({ "name": name, "customerRefId": customer_ref_id }),
        )
        .await
    }

    pub async fn create_contract_wallet(&self, name: &str) -> Result<Value, FireblocksError> {
        self.post_json("/v1/contracts", &json!({ "name": name })).await
    }

    pub async fn generate_new_address(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        description: &str,
        customer_ref_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/vault/accounts/{vault_account_id}/{asset_id}/addresses"),
            &json!({ "description": description, "customerRefId": customer_ref_id }),
        )
        .await
    }

    /// Address ids carry the tag as an `address:tag` suffix when present.
    pub async fn set_address_description(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
        description: &str,
    ) -> Result<Value, FireblocksError> {
        let address_id = if tag.is_empty() {
            address.to_string()
        } else {
            format!("{address}:{tag}")
        };
        self.put_json(
            &format!("/v1/vault/accounts/{vault_account_id}/{asset_id}/addresses/{address_id}"),
            &json!({ "description": description }),
        )
        .await
    }

    pub async fn create_external_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/external_wallets/{wallet_id}/{asset_id}"),
            &json!({ "address": address, "tag": tag }),
        )
        .await
    }

    pub async fn create_internal_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/internal_wallets/{wallet_id}/{asset_id}"),
            &json!({ "address": address, "tag": tag }),
        )
        .await
    }

    pub async fn create_contract_wallet_asset(
        &self,
        contract_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/contracts/{contract_id}/{asset_id}"),
            &json!({ "address": address, "tag": tag }),
        )
        .await
    }

    pub async fn create_vault_asset(
        &self,
        vault_account_id: &str,
        asset_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.post_json(
            &format!("/v1/vault/accounts/{vault_account_id}/{asset_id}"),
            &json!({}),
        )
        .await
    }

    /// Pure proxy: relays upstream status and raw body verbatim, including
    /// non-2xx responses.
    pub async fn create_transaction(&self, body: &[u8]) -> Result<(u16, String), FireblocksError> {
        let path = "/v1/transactions";
        let token = self.signer.sign(path, body)?;
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {token}"))
            .header("X-API-Key", self.signer.api_key())
            .header("Content-Type", "application/json")
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| FireblocksError::Request(format!("POST {path} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FireblocksError::InvalidResponse(format!("POST {path} body: {e}")))?;
        Ok((status, body))
    }

    /// Single-asset read. The path deliberately has no `/v1` segment; this
    /// matches the resource path the callers of this endpoint expect.
    pub async fn get_vault_account_asset(
        &self,
        vault_account_id: &str,
        asset_id: &str,
    ) -> Result<Value, FireblocksError> {
        self.get_json(&format!("/vault/accounts/{vault_account_id}/{asset_id}"))
            .await
    }

    async fn get_json(&self, path: &str) -> Result<Value, FireblocksError> {
        let token = self.signer.sign(path, b"")?;
        debug!(path, "fireblocks GET");
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {token}"))
            .header("X-API-Key", self.signer.api_key())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| FireblocksError::Request(format!("GET {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FireblocksError::Request(format!(
                "GET {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FireblocksError::InvalidResponse(format!("GET {path} invalid JSON: {e}")))
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, FireblocksError> {
        self.send_json(reqwest::Method::POST, path, payload).await
    }

    async fn put_json(&self, path: &str, payload: &Value) -> Result<Value, FireblocksError> {
        self.send_json(reqwest::Method::PUT, path, payload).await
    }

    async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: &Value,
    ) -> Result<Value, FireblocksError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| FireblocksError::InvalidResponse(format!("serialize body failed: {e}")))?;
        let token = self.signer.sign(path, body.as_bytes())?;
        debug!(%method, path, "fireblocks request");
        let response = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {token}"))
            .header("X-API-Key", self.signer.api_key())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| FireblocksError::Request(format!("{method} {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FireblocksError::Request(format!(
                "{method} {path} returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            FireblocksError::InvalidResponse(format!("{method} {path} invalid JSON: {e}"))
        })
    }
}
