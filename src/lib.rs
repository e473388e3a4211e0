// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

//! Custody Orchestrator - Fireblocks Vault Provisioning Service
//!
//! A thin orchestration layer that sequences custody API calls (vault
//! accounts, wallets, addresses, asset bindings, transactions) behind a
//! small HTTP surface. All entities live on the custody platform; this
//! service only threads identifiers through fixed per-request call chains.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers (Axum)
//! - `chain` - Chain definitions and transports
//! - `fireblocks` - Signed custody API client

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod fireblocks;
pub mod models;
pub mod state;
