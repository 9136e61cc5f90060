//! Reminder route definitions

use axum::routing::get;
use axum::Router;

use crate::handlers::*;
use crate::state::AppState;

pub fn reminder_routes() -> Router<AppState> {
    Router::new().route("/api/reminders/send", get(send_reminders))
}
