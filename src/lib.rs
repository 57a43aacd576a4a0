//! Cookie-header authentication gateway for an LTI-launched chat front end.
//!
//! The platform hands the browser a signed RS256 JWT in a `token` cookie.
//! [`services::auth::HeaderAuthGateway`] turns that cookie into either an
//! [`services::auth::AuthenticatedIdentity`] or a denial; the axum layers in
//! [`middleware`] and [`api`] expose it over HTTP.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
