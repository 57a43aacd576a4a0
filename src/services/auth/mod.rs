pub mod claims;
pub mod cookie;
pub mod factory;
pub mod gateway;
pub mod identity;
pub mod token;

pub use factory::build_gateway;
pub use gateway::{AuthOutcome, DenialReason, HeaderAuthGateway};
pub use identity::{ADMINISTRATOR_ROLE, AuthenticatedIdentity, Role};
pub use token::{KeyLoadError, PublicKeyConfig, Rs256Verifier, TokenVerifier, ValidationPolicy};
