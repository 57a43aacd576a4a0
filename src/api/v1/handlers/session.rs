/*
 * Responsibility
 * - GET /session: the identity the gateway derived for this request
 * - GET /session/admin: same, but only for administrators
 */
use axum::Json;

use crate::api::v1::extractors::SessionIdentity;
use crate::error::AppError;
use crate::services::auth::AuthenticatedIdentity;

pub async fn current_session(
    SessionIdentity(identity): SessionIdentity,
) -> Json<AuthenticatedIdentity> {
    Json(identity)
}

pub async fn admin_session(
    SessionIdentity(identity): SessionIdentity,
) -> Result<Json<AuthenticatedIdentity>, AppError> {
    if !identity.role().is_admin() {
        tracing::info!(role = %identity.role(), "admin route refused");
        return Err(AppError::Forbidden);
    }

    Ok(Json(identity))
}
