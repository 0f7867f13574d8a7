//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod holidays;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes every resource route, before the prefix is applied.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(system::routes())
        .merge(holidays::routes())
        .merge(admin::routes(state))
}
