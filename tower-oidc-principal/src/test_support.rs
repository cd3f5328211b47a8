//! Fixtures for tests that need an authenticated [Principal] without
//! going through a real token.
//!
//! Call the builder imperatively from test setup code:
//!
//! ```
//! use tower_oidc_principal::test_support::PrincipalBuilder;
//!
//! let principal = PrincipalBuilder::new()
//!     .name("ch4mpy")
//!     .authorities(["ROLE_TESTER", "ROLE_AUTHOR"])
//!     .claim("foo", "bar")
//!     .build();
//! assert_eq!(principal.name(), "ch4mpy");
//! assert!(principal.has_authority("ROLE_TESTER"));
//! ```

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
    authorities::Authority,
    claims::{ClaimSet, ClaimsNormalizer, OpenidClaimsNormalizer},
    principal::Principal,
};

/// Builds a [Principal] fixture.
///
/// Defaults: name `user`, authorities `{ROLE_USER}`, bearer token
/// `test.token`. The name is written through the `preferred_username`
/// claim so the principal's name derivation stays in effect.
pub struct PrincipalBuilder {
    claims: Map<String, Value>,
    authorities: HashSet<Authority>,
    bearer_token: String,
}

impl PrincipalBuilder {
    pub fn new() -> Self {
        Self {
            claims: Map::new(),
            authorities: [Authority::from("ROLE_USER")].into_iter().collect(),
            bearer_token: "test.token".to_owned(),
        }
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.claim("preferred_username", name.into())
    }

    pub fn authorities<A>(mut self, authorities: impl IntoIterator<Item = A>) -> Self
    where
        A: Into<Authority>,
    {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = token.into();
        self
    }

    pub fn build(self) -> Principal {
        let claims: ClaimSet = OpenidClaimsNormalizer.normalize(&self.claims);
        Principal::new(claims, self.authorities, self.bearer_token)
    }
}

impl Default for PrincipalBuilder {
    fn default() -> Self {
        Self::new()
    }
}
