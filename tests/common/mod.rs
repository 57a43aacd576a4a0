//! Shared fixtures: platform/attacker RSA keys and token builders.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use lti_header_gateway::config::Config;
use lti_header_gateway::services::auth::{
    HeaderAuthGateway, PublicKeyConfig, Rs256Verifier, ValidationPolicy,
};
use serde_json::{Value, json};

pub const PLATFORM_PRIVATE: &str = include_str!("../fixtures/platform.rsa");
pub const PLATFORM_PUBLIC: &str = include_str!("../fixtures/platform.rsa.pub");
pub const ATTACKER_PRIVATE: &str = include_str!("../fixtures/attacker.rsa");
pub const PLATFORM_PUBLIC_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/platform.rsa.pub");

pub fn gateway() -> HeaderAuthGateway {
    let key = PublicKeyConfig::from_pem(PLATFORM_PUBLIC).expect("fixture key");
    let verifier = Rs256Verifier::new(key, &ValidationPolicy::default());
    HeaderAuthGateway::new(Arc::new(verifier))
}

pub fn config() -> Config {
    Config::from_lookup(|key| match key {
        "TOKEN_PUBLIC_KEY_PATH" => Some(PLATFORM_PUBLIC_PATH.to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Claims as an LTI launch would set them, valid for one hour.
pub fn launch_claims(roles: &[&str]) -> Value {
    json!({
        "user": "u1",
        "platformId": "p1",
        "platformContext": {
            "roles": roles,
            "context": { "id": "c1", "label": "CS101" }
        },
        "iat": Utc::now().timestamp(),
        "exp": Utc::now().timestamp() + 3600
    })
}

pub fn sign_with(alg: Algorithm, private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).expect("fixture private key");
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &key).expect("sign token")
}

pub fn platform_token(claims: &Value) -> String {
    sign_with(Algorithm::RS256, PLATFORM_PRIVATE, claims)
}

pub fn unsigned_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("{header}.{payload}.")
}

pub fn hmac_token(secret: &[u8], claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

pub fn cookie(token: &str) -> String {
    format!("token={token}")
}
