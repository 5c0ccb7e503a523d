//! JSON API routes.
//!
//! `/api/translate` always answers 200 with the `{ success, text?, error? }`
//! shape; settings routes use status codes for malformed input.

mod providers;
mod settings;
mod translate;

pub use providers::list_providers;
pub use settings::{get_settings, update_settings};
pub use translate::translate;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::state::AppState;

/// All API routes, without middleware
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/providers", get(list_providers))
        .with_state(state)
}
