use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthenticatedIdentity;
use crate::state::AppState;

/// Handler-side access to the identity the header-auth middleware attached.
/// Missing identity (route not behind the middleware) is a 401.
pub struct SessionIdentity(pub AuthenticatedIdentity);

impl FromRequestParts<AppState> for SessionIdentity
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(SessionIdentity)
            .ok_or(AppError::Unauthorized)
    }
}
