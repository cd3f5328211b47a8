use std::sync::Arc;

use serde_json::Value;

use crate::{
    authorities::AuthoritiesExtractor, builder::PrincipalConverterBuilder, claims::ClaimsNormalizer,
    error::ConvertError, principal::Principal,
};

/// Turns a raw claim mapping and its compact bearer token into a
/// [Principal].
///
/// The converter is a pure function over its inputs and its two
/// injected collaborators: it performs no I/O, holds no mutable state
/// and may be invoked concurrently without synchronization.
#[derive(Clone)]
pub struct PrincipalConverter {
    normalizer: Arc<dyn ClaimsNormalizer>,
    authorities: Arc<dyn AuthoritiesExtractor>,
}

impl PrincipalConverter {
    pub(crate) fn new(
        normalizer: Arc<dyn ClaimsNormalizer>,
        authorities: Arc<dyn AuthoritiesExtractor>,
    ) -> Self {
        Self {
            normalizer,
            authorities,
        }
    }

    pub fn builder() -> PrincipalConverterBuilder {
        PrincipalConverterBuilder::new()
    }

    /// Converts `raw_claims` into an immutable [Principal] carrying
    /// `bearer_token` verbatim.
    ///
    /// Fails with [ConvertError::InvalidTokenFormat] only when
    /// `raw_claims` is not a JSON object. Missing or malformed optional
    /// claims are absorbed by the normalizer, never raised here.
    /// Authorities are always extracted from the normalized claim set,
    /// never from the raw mapping.
    pub fn convert(
        &self,
        raw_claims: &Value,
        bearer_token: &str,
    ) -> Result<Principal, ConvertError> {
        let raw_claims = raw_claims
            .as_object()
            .ok_or(ConvertError::InvalidTokenFormat)?;
        let claims = self.normalizer.normalize(raw_claims);
        let authorities = self.authorities.extract(&claims);
        Ok(Principal::new(claims, authorities, bearer_token))
    }
}

impl std::fmt::Debug for PrincipalConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalConverter").finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use mockall::mock;
    use mockall::predicate::eq;
    use serde_json::{json, Map};

    use crate::{
        authorities::{Authority, NestedRolesExtractor, StaticAuthoritiesExtractor},
        claims::{ClaimSet, OpenidClaimsNormalizer},
    };

    use super::*;

    mock! {
        Normalizer {}
        impl ClaimsNormalizer for Normalizer {
            fn normalize(&self, raw_claims: &Map<String, serde_json::Value>) -> ClaimSet;
        }
    }

    mock! {
        Extractor {}
        impl AuthoritiesExtractor for Extractor {
            fn extract(&self, claims: &ClaimSet) -> HashSet<Authority>;
        }
    }

    fn default_converter() -> PrincipalConverter {
        PrincipalConverter::builder().build()
    }

    #[test]
    fn null_claims_fail_with_invalid_token_format() {
        let result = default_converter().convert(&Value::Null, "xyz");

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ConvertError::InvalidTokenFormat);
    }

    #[test]
    fn non_object_claims_fail_with_invalid_token_format() {
        let converter = default_converter();

        for raw in [json!("claims"), json!(42), json!(["sub"])] {
            let result = converter.convert(&raw, "xyz");
            assert_eq!(result.unwrap_err(), ConvertError::InvalidTokenFormat);
        }
    }

    #[test]
    fn converts_claims_token_and_name() {
        let converter = default_converter();
        let raw = json!({ "sub": "42", "preferred_username": "ch4mpy" });

        let principal = converter.convert(&raw, "xyz").unwrap();

        assert_eq!(principal.name(), "ch4mpy");
        assert_eq!(principal.claims().get_str("sub"), Some("42"));
        assert_eq!(principal.bearer_token(), "xyz");
    }

    #[test]
    fn missing_optional_claims_are_absorbed() {
        let converter = default_converter();

        let principal = converter.convert(&json!({}), "xyz").unwrap();

        assert_eq!(principal.name(), "user");
        assert!(principal.authorities().is_empty());
    }

    #[test]
    fn keycloak_roles_become_authorities() {
        let converter = PrincipalConverter::builder()
            .authorities_extractor(Arc::new(NestedRolesExtractor::default()))
            .build();
        let raw = json!({ "realm_access": { "roles": ["tester", "author"] } });

        let principal = converter.convert(&raw, "xyz").unwrap();

        let expected: HashSet<Authority> = [
            Authority::from("ROLE_TESTER"),
            Authority::from("ROLE_AUTHOR"),
        ]
        .into_iter()
        .collect();
        assert_eq!(principal.authorities(), &expected);
    }

    #[test]
    fn extractor_sees_normalized_claims() {
        let raw = json!({ "sub": "42" });
        let normalized = OpenidClaimsNormalizer.normalize(raw.as_object().unwrap());

        let mut normalizer = MockNormalizer::new();
        let returned = normalized.clone();
        normalizer
            .expect_normalize()
            .times(1)
            .returning(move |_| returned.clone());

        let mut extractor = MockExtractor::new();
        extractor
            .expect_extract()
            .with(eq(normalized))
            .times(1)
            .returning(|_| HashSet::new());

        let converter = PrincipalConverter::new(Arc::new(normalizer), Arc::new(extractor));
        converter.convert(&raw, "xyz").unwrap();
    }

    #[test]
    fn static_extractor_grants_fixed_authorities() {
        let converter = PrincipalConverter::builder()
            .authorities_extractor(Arc::new(StaticAuthoritiesExtractor::new(["ROLE_USER"])))
            .build();

        let principal = converter.convert(&json!({ "sub": "42" }), "xyz").unwrap();

        assert!(principal.has_authority("ROLE_USER"));
    }

    #[test]
    fn concurrent_conversions_do_not_cross_talk() {
        let converter = default_converter();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let converter = converter.clone();
                thread::spawn(move || {
                    let sub = format!("subject-{}", i);
                    let token = format!("token-{}", i);
                    let principal = converter
                        .convert(&json!({ "sub": sub }), &token)
                        .unwrap();
                    assert_eq!(principal.name(), format!("subject-{}", i));
                    assert_eq!(principal.bearer_token(), format!("token-{}", i));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
