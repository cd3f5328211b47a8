use std::collections::HashSet;
use std::fmt::Display;

use crate::authorities::Authority;
use crate::claims::ClaimSet;

/// Name used when neither `preferred_username` nor `sub` carries a
/// non-empty value.
pub const DEFAULT_NAME: &str = "user";

/// The authenticated identity: a claim set, the authorities derived
/// from it and the verbatim bearer token string.
///
/// Immutable once built. The name is derived from the claims: a
/// non-empty `preferred_username` takes priority, then a non-empty
/// `sub`, then the [DEFAULT_NAME] placeholder. The token string is kept
/// so downstream code can present it again, e.g. when proxying the
/// call.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    name: String,
    claims: ClaimSet,
    authorities: HashSet<Authority>,
    bearer_token: String,
}

impl Principal {
    pub fn new(
        claims: ClaimSet,
        authorities: HashSet<Authority>,
        bearer_token: impl Into<String>,
    ) -> Self {
        let name = derive_name(&claims);
        Principal {
            name,
            claims,
            authorities,
            bearer_token: bearer_token.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    pub fn authorities(&self) -> &HashSet<Authority> {
        &self.authorities
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }
}

fn derive_name(claims: &ClaimSet) -> String {
    claims
        .preferred_username()
        .filter(|name| !name.is_empty())
        .or_else(|| claims.subject().filter(|sub| !sub.is_empty()))
        .unwrap_or(DEFAULT_NAME)
        .to_owned()
}

impl Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
