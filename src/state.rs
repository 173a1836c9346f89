use std::sync::Arc;

use crate::database::MapGateway;
use crate::session::SessionKeys;

/// Shared per-process handles. Holds no request data.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn MapGateway>,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(gateway: Arc<dyn MapGateway>, sessions: SessionKeys) -> Self {
        Self { gateway, sessions }
    }
}
