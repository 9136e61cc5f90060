//! Borrower route definitions

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::*;
use crate::state::AppState;

pub fn borrower_routes() -> Router<AppState> {
    Router::new()
        .route("/api/borrowers", post(create_borrower).get(list_borrowers))
        .route(
            "/api/borrowers/:id",
            get(get_borrower).put(update_borrower).delete(delete_borrower),
        )
}
