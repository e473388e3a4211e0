// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{ChainRequest, DeploySummary, EscrowResponse, ProvisioningResponse},
    state::AppState,
};

pub mod chains;
pub mod health;
pub mod primitives;
pub mod transactions;
pub mod vault;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/chains/trust", post(chains::trust_chain))
        .route("/chains/escrow", post(chains::escrow_chain))
        // Historical contract: the loopback deploy chain has no method guard.
        .route("/chains/deploy", any(chains::deploy_chain))
        .route("/chains/deploy-direct", post(chains::deploy_direct_chain))
        .route("/transactions", post(transactions::create_transaction))
        .route("/vault/asset", get(vault::get_vault_asset))
        .route("/createVaultAccount", post(primitives::create_vault_account))
        .route("/setCustomerRefId", post(primitives::set_customer_ref_id))
        .route(
            "/createExternalWallet",
            post(primitives::create_external_wallet),
        )
        .route(
            "/createInternalWallet",
            post(primitives::create_internal_wallet),
        )
        .route(
            "/generateNewAddress",
            post(primitives::generate_new_address),
        )
        .route(
            "/setAddressDescription",
            post(primitives::set_address_description),
        )
        .route(
            "/createExternalWalletAsset",
            post(primitives::create_external_wallet_asset),
        )
        .route(
            "/createInternalWalletAsset",
            post(primitives::create_internal_wallet_asset),
        )
        .route("/createVaultAsset", post(primitives::create_vault_asset))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::liveness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        chains::trust_chain,
        chains::escrow_chain,
        chains::deploy_chain,
        chains::deploy_direct_chain,
        transactions::create_transaction,
        vault::get_vault_asset,
        primitives::create_vault_account,
        primitives::set_customer_ref_id,
        primitives::create_external_wallet,
        primitives::create_internal_wallet,
        primitives::generate_new_address,
        primitives::set_address_description,
        primitives::create_external_wallet_asset,
        primitives::create_internal_wallet_asset,
        primitives::create_vault_asset,
        health::liveness
    ),
    components(
        schemas(
            ChainRequest,
            ProvisioningResponse,
            EscrowResponse,
            DeploySummary,
            primitives::CreateVaultAccountRequest,
            primitives::SetCustomerRefIdRequest,
            primitives::CreateWalletRequest,
            primitives::GenerateAddressRequest,
            primitives::SetAddressDescriptionRequest,
            primitives::ExternalWalletAssetRequest,
            primitives::InternalWalletAssetRequest,
            primitives::CreateVaultAssetRequest,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Chains", description = "Multi-step provisioning chains"),
        (name = "Primitives", description = "Single custody calls"),
        (name = "Transactions", description = "Transaction relay"),
        (name = "Vault", description = "Vault asset reads"),
        (name = "Health", description = "Probes")
    )
)]
struct ApiDoc;
