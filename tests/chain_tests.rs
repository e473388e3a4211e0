// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Chain behavior against a mocked custody upstream: step ordering, naming,
//! all-or-nothing abort, raw relays and the (intentional) lack of
//! idempotence.

mod common;

use axum::{
    body::{to_bytes, Bytes},
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use custody_orchestrator::api::{chains, transactions, vault};

use common::{acme_request, mount_provisioning_mocks, test_state};

/// Trust chain happy path: vault account receives the exact "Acme Trust
/// Vault" name and every step runs exactly once.
#[tokio::test]
async fn trust_chain_names_vault_and_runs_every_step_once() {
    let server = MockServer::start().await;
    mount_provisioning_mocks(&server, "Acme Trust Vault", "Trust", 1).await;

    let state = test_state(&server.uri());
    let Json(response) = chains::trust_chain(State(state), Json(acme_request()))
        .await
        .expect("trust chain succeeds");

    assert!(response.success);
    assert_eq!(response.vault_account_id, "va-1");
    assert_eq!(response.external_wallet_id, "ew-1");
    assert_eq!(response.internal_wallet_id, "iw-1");
    assert_eq!(response.external_wallet_asset_id.as_deref(), Some("ewa-1"));
    assert_eq!(response.vault_asset_id.as_deref(), Some("BTC"));

    server.verify().await;
}

/// Deploy-direct runs the same sequence with "Deployment" naming.
#[tokio::test]
async fn deploy_direct_chain_uses_deployment_naming() {
    let server = MockServer::start().await;
    mount_provisioning_mocks(&server, "Acme Deployment Vault", "Deployment", 1).await;

    let state = test_state(&server.uri());
    let Json(response) = chains::deploy_direct_chain(State(state), Json(acme_request()))
        .await
        .expect("deploy-direct chain succeeds");

    assert!(response.success);
    assert_eq!(response.vault_account_id, "va-1");

    server.verify().await;
}

/// If step k fails, steps 1..k-1 ran exactly once and steps k+1..N never
/// ran. Here k = internal wallet creation (the second half of step 3).
#[tokio::test]
async fn trust_chain_aborts_on_step_failure_without_running_later_steps() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "va-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts/va-1/set_customer_ref_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/external_wallets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "ew-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/internal_wallets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    // Everything after the failing step must never be reached.
    for never in [
        "/v1/vault/accounts/va-1/BTC/addresses",
        "/v1/external_wallets/ew-1/BTC",
        "/v1/vault/accounts/va-1/BTC",
    ] {
        Mock::given(method("POST"))
            .and(path(never))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;
    }

    let state = test_state(&server.uri());
    let error = chains::trust_chain(State(state), Json(acme_request()))
        .await
        .expect_err("chain must fail");

    // Generic 500 only; no per-step diagnostic for the caller.
    assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.message, "Create Trust Action chain failed");

    server.verify().await;
}

/// Escrow chain: vault named "Acme Escrow Vault" and the contract wallet
/// carries the identical name.
#[tokio::test]
async fn escrow_chain_names_contract_wallet_after_vault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts"))
        .and(body_partial_json(json!({ "name": "Acme Escrow Vault" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "va-9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts/va-9/set_customer_ref_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts/va-9/BTC/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": "addr-9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/vault/accounts/va-9/BTC/addresses/addr-9:t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/contracts"))
        .and(body_partial_json(json!({ "name": "Acme Escrow Vault" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cw-1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/contracts/cw-1/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cwa-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let Json(response) = chains::escrow_chain(State(state), Json(acme_request()))
        .await
        .expect("escrow chain succeeds");

    assert!(response.success);
    assert_eq!(response.contract_wallet["id"], "cw-1");

    server.verify().await;
}

/// Escrow follows the same all-or-nothing policy: a contract-wallet failure
/// stops the chain before the asset binding, and the caller sees only the
/// generic escrow error.
#[tokio::test]
async fn escrow_chain_aborts_on_step_failure_without_running_later_steps() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "va-9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts/va-9/set_customer_ref_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/vault/accounts/va-9/BTC/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": "addr-9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/vault/accounts/va-9/BTC/addresses/addr-9:t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/contracts"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    // The asset binding must never run once the contract wallet failed.
    Mock::given(method("POST"))
        .and(path("/v1/contracts/cw-1/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let error = chains::escrow_chain(State(state), Json(acme_request()))
        .await
        .expect_err("chain must fail");

    assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.message, "Create Escrow Action chain failed");

    server.verify().await;
}

/// Replaying an identical request creates new upstream entities; nothing in
/// this layer deduplicates. Current behavior, asserted deliberately.
#[tokio::test]
async fn replaying_a_chain_request_creates_new_entities() {
    let server = MockServer::start().await;
    mount_provisioning_mocks(&server, "Acme Trust Vault", "Trust", 2).await;

    let state = test_state(&server.uri());
    for _ in 0..2 {
        chains::trust_chain(State(state.clone()), Json(acme_request()))
            .await
            .expect("trust chain succeeds");
    }

    // expect(2) on every mock: both runs hit the upstream in full.
    server.verify().await;
}

/// The vault asset query signs and issues a GET against exactly
/// `<base>/vault/accounts/<vaultAccountId>/<assetId>`.
#[tokio::test]
async fn vault_asset_query_builds_expected_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vault/accounts/v1/BTC"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "BTC", "total": "0" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let Json(asset) = vault::get_vault_asset(
        State(state),
        Query(vault::VaultAssetQuery {
            vault_account_id: "v1".to_string(),
            asset_id: "BTC".to_string(),
        }),
    )
    .await
    .expect("vault asset query succeeds");

    assert_eq!(asset["id"], "BTC");

    server.verify().await;
}

/// The transaction proxy relays the upstream status and body verbatim,
/// including non-2xx responses.
#[tokio::test]
async fn transaction_proxy_relays_upstream_response_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "tx-1", "status": "SUBMITTED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let payload = json!({ "assetId": "BTC", "amount": "0.1" });
    let response = transactions::create_transaction(
        State(state),
        Bytes::from(serde_json::to_vec(&payload).unwrap()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let relayed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(relayed["id"], "tx-1");
    assert_eq!(relayed["status"], "SUBMITTED");

    server.verify().await;
}

#[tokio::test]
async fn transaction_proxy_relays_upstream_rejections_too() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid asset" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = test_state(&server.uri());
    let response =
        transactions::create_transaction(State(state), Bytes::from_static(b"{}"))
            .await
            .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let relayed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(relayed["message"], "Invalid asset");

    server.verify().await;
}
