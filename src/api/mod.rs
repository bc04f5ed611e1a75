//! API module
//!
//! HTTP API endpoints and middleware.

pub mod extract;
pub mod middleware;
pub mod routes;

use crate::domain::SelfTransferPolicy;
use crate::store::Store;

pub use routes::create_router;

/// Shared state for every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub self_transfer: SelfTransferPolicy,
}

impl AppState {
    pub fn new(store: Store, self_transfer: SelfTransferPolicy) -> Self {
        Self {
            store,
            self_transfer,
        }
    }
}
