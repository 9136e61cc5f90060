//! Dashboard route definitions

use axum::routing::get;
use axum::Router;

use crate::handlers::*;
use crate::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/api/dashboard/summary", get(dashboard_summary))
}
