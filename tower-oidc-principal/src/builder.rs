use std::sync::Arc;

use crate::{
    authorities::{AuthoritiesExtractor, NestedRolesExtractor},
    claims::{ClaimsNormalizer, OpenidClaimsNormalizer},
    converter::PrincipalConverter,
};

/// Builder for [PrincipalConverter].
///
/// Both collaborators default to their OIDC-flavoured built-ins:
/// [OpenidClaimsNormalizer] and [NestedRolesExtractor] with the
/// Keycloak `realm_access.roles` layout.
pub struct PrincipalConverterBuilder {
    normalizer: Option<Arc<dyn ClaimsNormalizer>>,
    authorities: Option<Arc<dyn AuthoritiesExtractor>>,
}

impl PrincipalConverterBuilder {
    pub(crate) fn new() -> Self {
        Self {
            normalizer: None,
            authorities: None,
        }
    }

    pub fn claims_normalizer(mut self, normalizer: Arc<dyn ClaimsNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn authorities_extractor(mut self, extractor: Arc<dyn AuthoritiesExtractor>) -> Self {
        self.authorities = Some(extractor);
        self
    }

    pub fn build(self) -> PrincipalConverter {
        PrincipalConverter::new(
            self.normalizer
                .unwrap_or_else(|| Arc::new(OpenidClaimsNormalizer)),
            self.authorities
                .unwrap_or_else(|| Arc::new(NestedRolesExtractor::default())),
        )
    }
}

impl Default for PrincipalConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
