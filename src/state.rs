/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - The gateway is immutable after startup, so cloning only bumps an Arc
 */
use std::sync::Arc;

use crate::services::auth::HeaderAuthGateway;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gateway: Arc<HeaderAuthGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<HeaderAuthGateway>) -> Self {
        Self { gateway }
    }
}
