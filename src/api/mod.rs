//! Plain HTTP routes served next to the WebSocket endpoint.

pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router for all non-WebSocket routes.
pub fn build_router() -> Router<AppState> {
    system::routes()
}
