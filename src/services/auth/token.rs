//! RS256 token verification.
//!
//! # Security
//!
//! - Tokens are size-checked before any decoding
//! - The algorithm is pinned to RS256; the token's own `alg` header is only
//!   inspected to reject anything else early (`none`, HMAC, RS384/RS512, PS*)
//! - `exp` and `nbf` are honored when present
//! - Neither the token nor key material is ever logged or printed via `Debug`

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::Value;
use thiserror::Error;

use crate::services::auth::claims::RawClaims;
use crate::services::auth::gateway::DenialReason;

/// Maximum accepted token size (8 KiB). Larger tokens are rejected unparsed.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// Upper bound for clock-skew leeway (one day). jsonwebtoken subtracts the
/// leeway from the current epoch, so it must stay well below it.
pub const MAX_LEEWAY_SECONDS: u64 = 86_400;

const EXPECTED_ALG: &str = "RS256";

/// Verifies a raw token and yields its payload.
///
/// Implementations must be pure with respect to the token: the same token
/// and key always give the same answer (modulo the clock for `exp`/`nbf`).
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<RawClaims, DenialReason>;
}

#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("failed to read public key file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RSA public key PEM: {0}")]
    InvalidPem(#[source] jsonwebtoken::errors::Error),
}

/// The platform's RSA public key, parsed once at startup.
#[derive(Clone)]
pub struct PublicKeyConfig {
    decoding_key: DecodingKey,
}

impl fmt::Debug for PublicKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("PublicKeyConfig").finish_non_exhaustive()
    }
}

impl PublicKeyConfig {
    /// Accepts PKCS#1 (`RSA PUBLIC KEY`) or SPKI (`PUBLIC KEY`) PEM.
    pub fn from_pem(pem: &str) -> Result<Self, KeyLoadError> {
        let decoding_key =
            DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(KeyLoadError::InvalidPem)?;
        Ok(Self { decoding_key })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        let path = path.as_ref();
        let pem = std::fs::read_to_string(path).map_err(|source| KeyLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_pem(&pem)
    }
}

/// Claim checks applied on top of the signature.
#[derive(Debug, Clone, Default)]
pub struct ValidationPolicy {
    pub leeway_seconds: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

#[derive(Clone)]
pub struct Rs256Verifier {
    key: PublicKeyConfig,
    validation: Validation,
}

impl fmt::Debug for Rs256Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rs256Verifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl Rs256Verifier {
    pub fn new(key: PublicKeyConfig, policy: &ValidationPolicy) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // Temporal claims are optional, but enforced when the platform sets them.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = policy.leeway_seconds.min(MAX_LEEWAY_SECONDS);
        if let Some(issuer) = &policy.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &policy.audience {
            validation.set_audience(&[audience]);
        }

        Self { key, validation }
    }
}

impl TokenVerifier for Rs256Verifier {
    fn verify(&self, token: &str) -> Result<RawClaims, DenialReason> {
        check_header(token)?;

        let data = jsonwebtoken::decode::<Value>(token, &self.key.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = classify(e.kind());
                // Library error payloads can echo token bytes; log the category only.
                tracing::debug!(category = reason.category(), "token decode failed");
                reason
            })?;

        Ok(data.claims)
    }
}

/// Structural checks and algorithm pin, before any cryptographic work.
fn check_header(token: &str) -> Result<(), DenialReason> {
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        return Err(DenialReason::MalformedToken);
    }

    let segments: Vec<&str> = token.split('.').collect();
    let [header, _payload, _signature] = segments.as_slice() else {
        return Err(DenialReason::MalformedToken);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| DenialReason::MalformedToken)?;
    let header: Value =
        serde_json::from_slice(&header).map_err(|_| DenialReason::MalformedToken)?;

    match header.get("alg").and_then(Value::as_str) {
        Some(EXPECTED_ALG) => Ok(()),
        Some(_) => Err(DenialReason::AlgorithmMismatch),
        None => Err(DenialReason::MalformedToken),
    }
}

fn classify(kind: &ErrorKind) -> DenialReason {
    match kind {
        ErrorKind::InvalidSignature => DenialReason::SignatureInvalid,
        ErrorKind::InvalidAlgorithm => DenialReason::AlgorithmMismatch,
        ErrorKind::ExpiredSignature => DenialReason::TokenExpired,
        ErrorKind::ImmatureSignature => DenialReason::TokenNotYetValid,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => DenialReason::ClaimRejected,
        _ => DenialReason::MalformedToken,
    }
}
