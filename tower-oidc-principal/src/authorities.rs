use std::collections::HashSet;
use std::fmt::Display;

use serde_json::Value;

use crate::claims::ClaimSet;

/// An opaque string capability or role, e.g. `ROLE_ADMIN`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Authority(String);

impl Authority {
    pub fn new(value: impl Into<String>) -> Self {
        Authority(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Authority {
    fn from(value: &str) -> Self {
        Authority(value.to_owned())
    }
}

impl From<String> for Authority {
    fn from(value: String) -> Self {
        Authority(value)
    }
}

/// Derives a set of authorities from a normalized claim set.
///
/// Extractors are always invoked on normalized claims, never on the raw
/// mapping. A missing source claim must yield an empty set, not an error.
pub trait AuthoritiesExtractor: Send + Sync {
    fn extract(&self, claims: &ClaimSet) -> HashSet<Authority>;
}

/// Reads a flat claim directly as authorities.
///
/// The claim may hold either a list of strings or a single
/// space-delimited string (the usual `scope` encoding). Values are used
/// verbatim, without prefix or case transformation.
#[derive(Debug)]
pub struct FlatClaimExtractor {
    claim: String,
}

impl FlatClaimExtractor {
    pub fn new(claim: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
        }
    }
}

impl AuthoritiesExtractor for FlatClaimExtractor {
    fn extract(&self, claims: &ClaimSet) -> HashSet<Authority> {
        match claims.get(&self.claim) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(Authority::from)
                .collect(),
            Some(Value::String(values)) => values
                .split(' ')
                .filter(|v| !v.is_empty())
                .map(Authority::from)
                .collect(),
            _ => HashSet::new(),
        }
    }
}

/// Reads a role list from a named sub-claim and turns each role into a
/// prefixed authority.
///
/// Defaults match the usual Keycloak layout: roles are read from
/// `realm_access.roles`, uppercased and prefixed with `ROLE_`, so a
/// `tester` role becomes `ROLE_TESTER`. The uppercase step can be
/// switched off with [preserve_case](NestedRolesExtractor::preserve_case).
#[derive(Debug)]
pub struct NestedRolesExtractor {
    claim: String,
    roles_key: String,
    prefix: String,
    uppercase: bool,
}

impl NestedRolesExtractor {
    pub fn new(
        claim: impl Into<String>,
        roles_key: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            roles_key: roles_key.into(),
            prefix: prefix.into(),
            uppercase: true,
        }
    }

    /// Keep roles as-is instead of uppercasing them.
    pub fn preserve_case(mut self) -> Self {
        self.uppercase = false;
        self
    }
}

impl Default for NestedRolesExtractor {
    fn default() -> Self {
        Self::new("realm_access", "roles", "ROLE_")
    }
}

impl AuthoritiesExtractor for NestedRolesExtractor {
    fn extract(&self, claims: &ClaimSet) -> HashSet<Authority> {
        let roles = claims
            .get(&self.claim)
            .and_then(Value::as_object)
            .and_then(|access| access.get(&self.roles_key))
            .and_then(Value::as_array);
        match roles {
            Some(roles) => roles
                .iter()
                .filter_map(Value::as_str)
                .map(|role| {
                    let role = if self.uppercase {
                        role.to_uppercase()
                    } else {
                        role.to_owned()
                    };
                    Authority::new(format!("{}{}", self.prefix, role))
                })
                .collect(),
            None => HashSet::new(),
        }
    }
}

/// Ignores the claims and returns a fixed authority set.
///
/// Useful for systems without granular roles, where being authenticated
/// at all grants a default authority.
#[derive(Debug, Default)]
pub struct StaticAuthoritiesExtractor {
    authorities: HashSet<Authority>,
}

impl StaticAuthoritiesExtractor {
    pub fn new<A>(authorities: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Authority>,
    {
        Self {
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthoritiesExtractor for StaticAuthoritiesExtractor {
    fn extract(&self, _claims: &ClaimSet) -> HashSet<Authority> {
        self.authorities.clone()
    }
}
