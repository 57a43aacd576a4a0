/// Factory: build `HeaderAuthGateway` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, KeySource};
use crate::services::auth::{
    HeaderAuthGateway, KeyLoadError, PublicKeyConfig, Rs256Verifier, ValidationPolicy,
};

/// Loads the platform public key once. A missing or unreadable key is fatal.
pub fn build_gateway(config: &Config) -> Result<Arc<HeaderAuthGateway>, KeyLoadError> {
    let key = match &config.token_public_key {
        KeySource::Pem(pem) => PublicKeyConfig::from_pem(pem)?,
        KeySource::File(path) => PublicKeyConfig::from_file(path)?,
    };

    let policy = ValidationPolicy {
        leeway_seconds: config.token_leeway_seconds,
        issuer: config.token_issuer.clone(),
        audience: config.token_audience.clone(),
    };

    tracing::info!(source = %config.token_public_key, "loaded token public key");

    let verifier = Rs256Verifier::new(key, &policy);
    Ok(Arc::new(HeaderAuthGateway::new(Arc::new(verifier))))
}
