// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Fireblocks custody API integration: per-request JWT signing and a thin
//! typed client over the REST endpoints this service orchestrates.

pub mod client;
pub mod signer;

pub use client::FireblocksClient;
pub use signer::RequestSigner;

#[derive(Debug, thiserror::Error)]
pub enum FireblocksError {
    #[error("Fireblocks signing key invalid: {0}")]
    InvalidKey(String),

    #[error("Fireblocks request signing failed: {0}")]
    Signing(String),

    #[error("Fireblocks request failed: {0}")]
    Request(String),

    #[error("Fireblocks response was invalid: {0}")]
    InvalidResponse(String),
}
