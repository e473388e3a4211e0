// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Request/response types and the transient references threaded through a
//! chain. Nothing here outlives a single request; every entity is owned by
//! the custody platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Input accepted by the trust, escrow and deploy-direct chains.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainRequest {
    /// Base name; the chain appends its vault suffix (e.g. "Trust Vault").
    pub name: String,
    /// Customer reference propagated to every created entity.
    pub customer_ref_id: String,
    /// Asset to provision (e.g. "BTC").
    pub asset_id: String,
    /// Human-readable description for the generated address.
    pub description: String,
    /// Address tag/memo.
    pub tag: String,
}

/// Vault account reference produced by step 1 of every chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultAccountRef {
    pub id: String,
    pub customer_ref_id: String,
}

/// Wallet reference (external, internal or contract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRef {
    pub id: String,
}

/// Deposit address reference produced by address generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRef {
    pub address: String,
    pub tag: Option<String>,
}

/// Pulls an `id` field out of an upstream response. Fireblocks returns ids
/// as strings, but sandbox mocks sometimes echo numbers.
pub fn extract_id(value: &Value) -> Option<String> {
    match value.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

impl WalletRef {
    pub fn from_response(value: &Value) -> Result<Self, String> {
        let id = extract_id(value).ok_or("missing wallet id in response")?;
        Ok(Self { id })
    }
}

impl VaultAccountRef {
    pub fn from_response(value: &Value, customer_ref_id: &str) -> Result<Self, String> {
        let id = extract_id(value).ok_or("missing vault account id in response")?;
        Ok(Self {
            id,
            customer_ref_id: customer_ref_id.to_string(),
        })
    }
}

impl AddressRef {
    pub fn from_response(value: &Value) -> Result<Self, String> {
        let address = value
            .get("address")
            .and_then(Value::as_str)
            .ok_or("missing address in response")?
            .to_string();
        let tag = value
            .get("tag")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Ok(Self { address, tag })
    }
}

/// Aggregate returned by the trust and deploy-direct chains: every step's
/// raw upstream response, field names matching the public contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningResponse {
    pub success: bool,
    pub vault_account_id: String,
    #[schema(value_type = Object)]
    pub vault_account: Value,
    pub external_wallet_id: String,
    #[schema(value_type = Object)]
    pub external_wallet: Value,
    pub internal_wallet_id: String,
    #[schema(value_type = Object)]
    pub internal_wallet: Value,
    #[schema(value_type = Object)]
    pub new_address: Value,
    #[schema(value_type = Object)]
    pub set_address_description: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_wallet_asset_id: Option<String>,
    #[schema(value_type = Object)]
    pub external_wallet_asset: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_wallet_asset_id: Option<String>,
    #[schema(value_type = Object)]
    pub internal_wallet_asset: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_asset_id: Option<String>,
    #[schema(value_type = Object)]
    pub vault_asset: Value,
}

/// Aggregate returned by the escrow chain.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EscrowResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub vault_account: Value,
    #[schema(value_type = Object)]
    pub new_address: Value,
    #[schema(value_type = Object)]
    pub set_address_description: Value,
    #[schema(value_type = Object)]
    pub contract_wallet: Value,
    #[schema(value_type = Object)]
    pub contract_wallet_asset: Value,
}

/// Summary returned by the loopback deploy chain.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeploySummary {
    pub message: String,
    pub vault_account_id: String,
    pub customer_ref_id: String,
    pub external_wallet_id: String,
    pub internal_wallet_id: String,
}
