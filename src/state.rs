// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Custody Orchestrator Contributors

use std::sync::Arc;

use crate::{config::Config, fireblocks::FireblocksClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fireblocks: Arc<FireblocksClient>,
}

impl AppState {
    pub fn new(config: Config, fireblocks: FireblocksClient) -> Self {
        Self {
            config: Arc::new(config),
            fireblocks: Arc::new(fireblocks),
        }
    }
}
