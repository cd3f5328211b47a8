use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{formats::PreferMany, serde_as, DefaultOnError, OneOrMany};

/// Standard OIDC claims, deserialized leniently.
///
/// A claim of the wrong type is treated as absent rather than failing
/// the whole claim set, and `aud` accepts either a single string or
/// an array of strings.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct StandardClaims {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub iss: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub sub: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<OneOrMany<_, PreferMany>>")]
    pub aud: Vec<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub exp: Option<u64>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub preferred_username: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub email: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub email_verified: Option<bool>,
}

/// Immutable view over the claims of a bearer token.
///
/// Standard OIDC claims are accessed through typed getters, everything
/// else through raw lookup by claim name. Constructed once at
/// authentication time and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimSet {
    standard: StandardClaims,
    raw: Map<String, Value>,
}

impl ClaimSet {
    pub fn new(raw: Map<String, Value>) -> Self {
        let standard = serde_json::from_value(Value::Object(raw.clone())).unwrap_or_default();
        ClaimSet { standard, raw }
    }

    pub fn subject(&self) -> Option<&str> {
        self.standard.sub.as_deref()
    }

    pub fn issuer(&self) -> Option<&str> {
        self.standard.iss.as_deref()
    }

    pub fn audiences(&self) -> &[String] {
        &self.standard.aud
    }

    /// Expiry as seconds since the unix epoch.
    pub fn expires_at(&self) -> Option<u64> {
        self.standard.exp
    }

    pub fn preferred_username(&self) -> Option<&str> {
        self.standard.preferred_username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.standard.email.as_deref()
    }

    pub fn email_verified(&self) -> Option<bool> {
        self.standard.email_verified
    }

    /// Raw lookup by claim name. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Raw lookup, narrowed to string claims.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.raw.get(name).and_then(Value::as_str)
    }

    /// Projection back to the raw claim mapping.
    ///
    /// Feeding this projection back through a normalizer yields an
    /// equal claim set.
    pub fn as_raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Display for ClaimSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.standard)
    }
}

/// Maps a raw claim mapping into a typed [ClaimSet].
///
/// Implementations must not mutate their input and must absorb absent
/// or malformed standard claims instead of failing.
pub trait ClaimsNormalizer: Send + Sync {
    fn normalize(&self, raw_claims: &Map<String, Value>) -> ClaimSet;
}

/// Default normalizer, producing a [ClaimSet] with the standard OIDC
/// claims parsed leniently.
#[derive(Debug, Default)]
pub struct OpenidClaimsNormalizer;

impl ClaimsNormalizer for OpenidClaimsNormalizer {
    fn normalize(&self, raw_claims: &Map<String, Value>) -> ClaimSet {
        ClaimSet::new(raw_claims.clone())
    }
}
