/*
 * Responsibility
 * - v1 URL structure
 * - Every v1 route sits behind header authentication
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::session::{admin_session, current_session};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/session", get(current_session))
        .route("/session/admin", get(admin_session));

    middleware::auth::header::apply(router, state)
}
