/*
 * Responsibility
 * - Role derivation from the resolved LTI role list
 * - The authenticated identity handed to the session layer
 */
use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::services::auth::claims::ResolvedClaims;

/// LIS institution role granting administrator rights.
pub const ADMINISTRATOR_ROLE: &str =
    "http://purl.imsglobal.org/vocab/lis/v2/institution/person#Administrator";

/// Identities produced here always come from the cookie header.
pub const PROVIDER: &str = "header";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request attributed to a specific user and role.
///
/// Only [`decide`] constructs this, so an instance always stands for a fully
/// verified token with complete claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    identifier: String,
    role: Role,
    platform_id: String,
    course_id: String,
}

impl AuthenticatedIdentity {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn platform_id(&self) -> &str {
        &self.platform_id
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn provider(&self) -> &'static str {
        PROVIDER
    }
}

impl Serialize for AuthenticatedIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AuthenticatedIdentity", 5)?;
        s.serialize_field("identifier", &self.identifier)?;
        s.serialize_field("role", &self.role)?;
        s.serialize_field("provider", PROVIDER)?;
        s.serialize_field("platformId", &self.platform_id)?;
        s.serialize_field("courseId", &self.course_id)?;
        s.end()
    }
}

/// Exact membership test; no prefix matching or case folding.
pub fn decide(claims: ResolvedClaims) -> AuthenticatedIdentity {
    let role = if claims.roles.iter().any(|r| r == ADMINISTRATOR_ROLE) {
        Role::Admin
    } else {
        Role::Student
    };

    AuthenticatedIdentity {
        identifier: claims.user,
        role,
        platform_id: claims.platform_id,
        course_id: claims.course_id,
    }
}
