//! Token kind tags and account roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage tag recording which kind of access token is held.
///
/// The tag travels with the token through storage so that a renewal can pick
/// the matching endpoint even when the claims carry no discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Access,
    CompanyAccess,
    AdminAccess,
}

impl TokenKind {
    /// Wire/storage representation of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::CompanyAccess => "access_company",
            Self::AdminAccess => "admin_access",
        }
    }

    /// Parse a stored or wire tag. Unknown tags are treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "access" => Some(Self::Access),
            "access_company" => Some(Self::CompanyAccess),
            "admin_access" => Some(Self::AdminAccess),
            _ => None,
        }
    }

    /// The account role this kind of token belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Access => Role::User,
            Self::CompanyAccess => Role::Company,
            Self::AdminAccess => Role::Admin,
        }
    }
}

/// Account role, used to pick login and renewal endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Company,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_tag() {
        for kind in [TokenKind::Access, TokenKind::CompanyAccess, TokenKind::AdminAccess] {
            assert_eq!(TokenKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TokenKind::parse("refresh"), None);
    }

    #[test]
    fn kind_maps_to_role() {
        assert_eq!(TokenKind::Access.role(), Role::User);
        assert_eq!(TokenKind::CompanyAccess.role(), Role::Company);
        assert_eq!(TokenKind::AdminAccess.role(), Role::Admin);
    }
}
