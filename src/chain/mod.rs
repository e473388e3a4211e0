// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Chain definitions. A chain is a fixed, strictly ordered sequence of
//! dependent custody calls; every step consumes identifiers produced by the
//! step before it. The provisioning sequence is defined once here and runs
//! over an injected [`ChainTransport`], so the direct and loopback deploy
//! variants cannot drift apart. Any step failing aborts the chain with no
//! compensation of already-created upstream entities.

pub mod loopback;

use serde_json::Value;

use crate::{
    fireblocks::{FireblocksClient, FireblocksError},
    models::{
        extract_id, AddressRef, ChainRequest, EscrowResponse, ProvisioningResponse,
        VaultAccountRef, WalletRef,
    },
};
use loopback::LoopbackClient;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error(transparent)]
    Upstream(#[from] FireblocksError),

    #[error("sibling endpoint call failed: {0}")]
    Sibling(String),

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("chain deadline exceeded")]
    Timeout,
}

/// Naming profile for the provisioning chain. Trust and deployment runs are
/// the same sequence; only the entity names differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainProfile {
    Trust,
    Deployment,
}

impl ChainProfile {
    fn word(self) -> &'static str {
        match self {
            ChainProfile::Trust => "Trust",
            ChainProfile::Deployment => "Deployment",
        }
    }

    pub fn vault_name(self, name: &str) -> String {
        format!("{name} {} Vault", self.word())
    }

    pub fn external_wallet_name(self, customer_ref_id: &str) -> String {
        format!("External {} Wallet {customer_ref_id}", self.word())
    }

    pub fn internal_wallet_name(self, customer_ref_id: &str) -> String {
        format!("Internal {} Wallet {customer_ref_id}", self.word())
    }
}

/// How chain steps reach the custody platform: directly with signed requests,
/// or through this service's own single-step sibling endpoints.
pub enum ChainTransport {
    Direct(std::sync::Arc<FireblocksClient>),
    Loopback(LoopbackClient),
}

impl ChainTransport {
    async fn create_vault_account(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => {
                Ok(client.create_vault_account(name, customer_ref_id).await?)
            }
            ChainTransport::Loopback(client) => {
                client.create_vault_account(name, customer_ref_id).await
            }
        }
    }

    async fn set_customer_ref_id(
        &self,
        vault_account_id: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => Ok(client
                .set_customer_ref_id(vault_account_id, customer_ref_id)
                .await?),
            ChainTransport::Loopback(client) => {
                client
                    .set_customer_ref_id(vault_account_id, customer_ref_id)
                    .await
            }
        }
    }

    async fn create_external_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => {
                Ok(client.create_external_wallet(name, customer_ref_id).await?)
            }
            ChainTransport::Loopback(client) => {
                client.create_external_wallet(name, customer_ref_id).await
            }
        }
    }

    async fn create_internal_wallet(
        &self,
        name: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => {
                Ok(client.create_internal_wallet(name, customer_ref_id).await?)
            }
            ChainTransport::Loopback(client) => {
                client.create_internal_wallet(name, customer_ref_id).await
            }
        }
    }

    async fn generate_new_address(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        description: &str,
        customer_ref_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => Ok(client
                .generate_new_address(vault_account_id, asset_id, description, customer_ref_id)
                .await?),
            ChainTransport::Loopback(client) => {
                client
                    .generate_new_address(vault_account_id, asset_id, description, customer_ref_id)
                    .await
            }
        }
    }

    async fn set_address_description(
        &self,
        vault_account_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
        description: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => Ok(client
                .set_address_description(vault_account_id, asset_id, address, tag, description)
                .await?),
            ChainTransport::Loopback(client) => {
                client
                    .set_address_description(vault_account_id, asset_id, address, tag, description)
                    .await
            }
        }
    }

    async fn create_external_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => Ok(client
                .create_external_wallet_asset(wallet_id, asset_id, address, tag)
                .await?),
            ChainTransport::Loopback(client) => {
                client
                    .create_external_wallet_asset(wallet_id, asset_id, address, tag)
                    .await
            }
        }
    }

    async fn create_internal_wallet_asset(
        &self,
        wallet_id: &str,
        asset_id: &str,
        address: &str,
        tag: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => Ok(client
                .create_internal_wallet_asset(wallet_id, asset_id, address, tag)
                .await?),
            ChainTransport::Loopback(client) => {
                client
                    .create_internal_wallet_asset(wallet_id, asset_id, address, tag)
                    .await
            }
        }
    }

    async fn create_vault_asset(
        &self,
        vault_account_id: &str,
        asset_id: &str,
    ) -> Result<Value, ChainError> {
        match self {
            ChainTransport::Direct(client) => {
                Ok(client.create_vault_asset(vault_account_id, asset_id).await?)
            }
            ChainTransport::Loopback(client) => {
                client.create_vault_asset(vault_account_id, asset_id).await
            }
        }
    }
}

/// The 8-step provisioning chain (trust and deployment vaults).
///
/// Order is load-bearing: the vault account id from step 1 scopes every later
/// step, wallet ids feed the asset bindings, and the generated address feeds
/// the description and binding steps.
pub async fn run_provisioning_chain(
    transport: &ChainTransport,
    profile: ChainProfile,
    request: &ChainRequest,
) -> Result<ProvisioningResponse, ChainError> {
    // Step 1: create the vault account.
    let vault_account = transport
        .create_vault_account(&profile.vault_name(&request.name), &request.customer_ref_id)
        .await?;
    let vault = VaultAccountRef::from_response(&vault_account, &request.customer_ref_id)
        .map_err(ChainError::InvalidResponse)?;

    // Step 2: bind the customer reference to the account.
    transport
        .set_customer_ref_id(&vault.id, &vault.customer_ref_id)
        .await?;

    // Step 3: external and internal counterparty wallets.
    let external_wallet = transport
        .create_external_wallet(
            &profile.external_wallet_name(&vault.customer_ref_id),
            &vault.customer_ref_id,
        )
        .await?;
    let external = WalletRef::from_response(&external_wallet).map_err(ChainError::InvalidResponse)?;

    let internal_wallet = transport
        .create_internal_wallet(
            &profile.internal_wallet_name(&vault.customer_ref_id),
            &vault.customer_ref_id,
        )
        .await?;
    let internal = WalletRef::from_response(&internal_wallet).map_err(ChainError::InvalidResponse)?;

    // Step 4: generate a deposit address for the asset.
    let new_address = transport
        .generate_new_address(
            &vault.id,
            &request.asset_id,
            &request.description,
            &vault.customer_ref_id,
        )
        .await?;
    let address = AddressRef::from_response(&new_address).map_err(ChainError::InvalidResponse)?;

    // Step 5: label the address.
    let set_address_description = transport
        .set_address_description(
            &vault.id,
            &request.asset_id,
            &address.address,
            &request.tag,
            &request.description,
        )
        .await?;

    // Steps 6-8: asset bindings, wallets first, vault account last.
    let external_wallet_asset = transport
        .create_external_wallet_asset(&external.id, &request.asset_id, &address.address, &request.tag)
        .await?;
    let internal_wallet_asset = transport
        .create_internal_wallet_asset(&internal.id, &request.asset_id, &address.address, &request.tag)
        .await?;
    let vault_asset = transport
        .create_vault_asset(&vault.id, &request.asset_id)
        .await?;

    Ok(ProvisioningResponse {
        success: true,
        vault_account_id: vault.id,
        vault_account,
        external_wallet_id: external.id,
        external_wallet,
        internal_wallet_id: internal.id,
        internal_wallet,
        new_address,
        set_address_description,
        external_wallet_asset_id: extract_id(&external_wallet_asset),
        external_wallet_asset,
        internal_wallet_asset_id: extract_id(&internal_wallet_asset),
        internal_wallet_asset,
        vault_asset_id: extract_id(&vault_asset),
        vault_asset,
    })
}

/// The escrow chain: vault account, address, then a contract wallet named
/// after the vault and its asset binding. Always runs directly against the
/// custody API; escrow vaults have no loopback variant.
pub async fn run_escrow_chain(
    client: &FireblocksClient,
    request: &ChainRequest,
) -> Result<EscrowResponse, ChainError> {
    let escrow_name = format!("{} Escrow Vault", request.name);

    let vault_account = client
        .create_vault_account(&escrow_name, &request.customer_ref_id)
        .await?;
    let vault = VaultAccountRef::from_response(&vault_account, &request.customer_ref_id)
        .map_err(ChainError::InvalidResponse)?;

    client
        .set_customer_ref_id(&vault.id, &vault.customer_ref_id)
        .await?;

    let new_address = client
        .generate_new_address(
            &vault.id,
            &request.asset_id,
            &request.description,
            &vault.customer_ref_id,
        )
        .await?;
    let address = AddressRef::from_response(&new_address).map_err(ChainError::InvalidResponse)?;

    let set_address_description = client
        .set_address_description(
            &vault.id,
            &request.asset_id,
            &address.address,
            &request.tag,
            &request.description,
        )
        .await?;

    // The contract wallet is named identically to the escrow vault account.
    let contract_wallet = client.create_contract_wallet(&escrow_name).await?;
    let contract = WalletRef::from_response(&contract_wallet).map_err(ChainError::InvalidResponse)?;

    let contract_wallet_asset = client
        .create_contract_wallet_asset(&contract.id, &request.asset_id, &address.address, &request.tag)
        .await?;

    Ok(EscrowResponse {
        success: true,
        vault_account,
        new_address,
        set_address_description,
        contract_wallet,
        contract_wallet_asset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_names_follow_convention() {
        assert_eq!(
            ChainProfile::Trust.vault_name("Acme"),
            "Acme Trust Vault"
        );
        assert_eq!(
            ChainProfile::Deployment.vault_name("Acme"),
            "Acme Deployment Vault"
        );
        assert_eq!(
            ChainProfile::Trust.external_wallet_name("cust-1"),
            "External Trust Wallet cust-1"
        );
        assert_eq!(
            ChainProfile::Deployment.internal_wallet_name("cust-1"),
            "Internal Deployment Wallet cust-1"
        );
    }
}
