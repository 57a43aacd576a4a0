/*
 * Responsibility
 * - Locate the platform/role/context fields inside verified token claims
 *
 * Notes
 * - Claims stay untyped JSON until this point. A signed payload is still
 *   untrusted input, so every level is checked and a missing or mis-typed
 *   field ends the pipeline instead of failing inside deserialization.
 */
use serde_json::Value;

use crate::services::auth::gateway::DenialReason;

/// Verified token payload, not yet structurally checked.
pub type RawClaims = Value;

/// Fields required to build an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClaims {
    pub user: String,
    pub platform_id: String,
    pub roles: Vec<String>,
    pub course_id: String,
}

pub fn resolve(claims: &RawClaims) -> Result<ResolvedClaims, DenialReason> {
    let user = required_str(claims, "/user", "user")?;
    let platform_id = required_str(claims, "/platformId", "platformId")?;
    let roles = required_str_list(claims, "/platformContext/roles", "platformContext.roles")?;
    let course_id = required_str(
        claims,
        "/platformContext/context/id",
        "platformContext.context.id",
    )?;

    Ok(ResolvedClaims {
        user,
        platform_id,
        roles,
        course_id,
    })
}

fn required_str(
    claims: &Value,
    pointer: &str,
    field: &'static str,
) -> Result<String, DenialReason> {
    claims
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or(DenialReason::IncompleteClaims { field })
}

fn required_str_list(
    claims: &Value,
    pointer: &str,
    field: &'static str,
) -> Result<Vec<String>, DenialReason> {
    let items = claims
        .pointer(pointer)
        .and_then(Value::as_array)
        .ok_or(DenialReason::IncompleteClaims { field })?;

    // A single non-string entry makes the whole list untrustworthy.
    items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(DenialReason::IncompleteClaims { field })
}
