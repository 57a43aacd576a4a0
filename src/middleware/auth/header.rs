//! Cookie header -> HeaderAuthGateway -> AuthenticatedIdentity in request extensions.
//!
//! Denied requests stop here with a uniform 401. The denial category is only
//! visible in the gateway's logs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::AuthOutcome;
use crate::state::AppState;

/// Apply header authentication to every route of `router`.
///
/// ```ignore
/// let v1 = middleware::auth::header::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, header_auth_middleware))
}

async fn header_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_header = cookie_header(req.headers());

    match state.gateway.authenticate(cookie_header.as_deref()) {
        AuthOutcome::Authenticated(identity) => {
            // middleware -> extractor
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        AuthOutcome::Denied(_) => Err(AppError::Unauthorized),
    }
}

/// HTTP/2 clients may split cookies across several `Cookie` headers; join them
/// back into one `; `-separated value. Non-UTF-8 values are dropped.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}
