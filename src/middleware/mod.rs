/*
 * Responsibility
 * - Public interface of the middleware layers
 * - auth: cookie header authentication for /api/v1
 * - http: transport concerns shared by every route
 */
pub mod auth;
pub mod http;
