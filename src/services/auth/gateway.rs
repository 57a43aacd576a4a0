//! Header-based authentication gateway.
//!
//! Runs the linear pipeline for one request:
//! cookie header -> token cookie -> signature check -> claims -> identity.
//! Every stage can end the pipeline with a [`DenialReason`]; nothing escapes
//! to the caller except an [`AuthOutcome`].

use std::sync::Arc;

use thiserror::Error;

use crate::services::auth::claims;
use crate::services::auth::cookie::{extract_cookies, locate_token};
use crate::services::auth::identity::{self, AuthenticatedIdentity};
use crate::services::auth::token::TokenVerifier;

/// Why a request was not authenticated.
///
/// The caller-visible outcome is the same for every variant. The variants
/// exist for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("no cookie header")]
    NoCookieHeader,

    #[error("no token cookie")]
    NoTokenCookie,

    #[error("malformed token")]
    MalformedToken,

    #[error("token algorithm not permitted")]
    AlgorithmMismatch,

    #[error("token signature invalid")]
    SignatureInvalid,

    #[error("token expired")]
    TokenExpired,

    #[error("token not yet valid")]
    TokenNotYetValid,

    #[error("token issuer or audience rejected")]
    ClaimRejected,

    #[error("incomplete claims: '{field}'")]
    IncompleteClaims { field: &'static str },
}

impl DenialReason {
    /// Anonymous requests are the normal case and are not worth a warning.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NoCookieHeader | Self::NoTokenCookie)
    }

    /// Stable label for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoCookieHeader => "no_cookie_header",
            Self::NoTokenCookie => "no_token_cookie",
            Self::MalformedToken => "malformed_token",
            Self::AlgorithmMismatch => "algorithm_mismatch",
            Self::SignatureInvalid => "signature_invalid",
            Self::TokenExpired => "token_expired",
            Self::TokenNotYetValid => "token_not_yet_valid",
            Self::ClaimRejected => "claim_rejected",
            Self::IncompleteClaims { .. } => "incomplete_claims",
        }
    }
}

/// Result of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthenticatedIdentity),
    Denied(DenialReason),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Denied(_) => None,
        }
    }

    pub fn into_result(self) -> Result<AuthenticatedIdentity, DenialReason> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Denied(reason) => Err(reason),
        }
    }
}

/// Stateless per request; the only shared state is the immutable verifier.
#[derive(Clone)]
pub struct HeaderAuthGateway {
    verifier: Arc<dyn TokenVerifier>,
}

impl std::fmt::Debug for HeaderAuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderAuthGateway").finish_non_exhaustive()
    }
}

impl HeaderAuthGateway {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authenticate a request from its `Cookie` header alone.
    pub fn authenticate(&self, cookie_header: Option<&str>) -> AuthOutcome {
        let outcome = match self.run(cookie_header) {
            Ok(identity) => AuthOutcome::Authenticated(identity),
            Err(reason) => AuthOutcome::Denied(reason),
        };

        match &outcome {
            AuthOutcome::Authenticated(identity) => {
                tracing::debug!(role = %identity.role(), "header authentication succeeded");
            }
            AuthOutcome::Denied(reason) if reason.is_expected() => {
                tracing::debug!(category = reason.category(), "anonymous request");
            }
            AuthOutcome::Denied(reason) => {
                tracing::warn!(category = reason.category(), "header authentication denied");
            }
        }

        outcome
    }

    fn run(&self, cookie_header: Option<&str>) -> Result<AuthenticatedIdentity, DenialReason> {
        let header = cookie_header
            .filter(|h| !h.trim().is_empty())
            .ok_or(DenialReason::NoCookieHeader)?;

        let cookies = extract_cookies(Some(header));
        let token = locate_token(&cookies).ok_or(DenialReason::NoTokenCookie)?;

        let raw = self.verifier.verify(token)?;
        let resolved = claims::resolve(&raw)?;

        Ok(identity::decide(resolved))
    }
}
