use core::fmt;
use std::sync::Arc;

use http::Request;
use log::debug;
use serde_json::Value;

use crate::{
    converter::PrincipalConverter,
    error::AuthError,
    error_handler::{DefaultErrorHandler, ErrorHandler},
    layer::PrincipalLayer,
    token_extract::{BearerHeaderTokenExtractor, TokenExtractor},
};

/// Authenticates incoming requests by converting their bearer token's
/// claims into a [Principal](crate::principal::Principal).
///
/// The token is expected to have been verified upstream; this component
/// only decodes the payload, runs the converter and attaches the
/// resulting principal to the request extensions. May be turned into a
/// tower layer by calling [into_layer](BearerAuthenticator::into_layer).
#[derive(Clone)]
pub struct BearerAuthenticator {
    converter: PrincipalConverter,
    token_extractor: Arc<dyn TokenExtractor + Send + Sync>,
}

impl BearerAuthenticator {
    pub fn new(converter: PrincipalConverter) -> Self {
        BearerAuthenticator {
            converter,
            token_extractor: Arc::new(BearerHeaderTokenExtractor {}),
        }
    }

    /// Replace how the bearer token is pulled out of the request
    /// headers.
    pub fn with_token_extractor(
        mut self,
        token_extractor: Arc<dyn TokenExtractor + Send + Sync>,
    ) -> Self {
        self.token_extractor = token_extractor;
        self
    }

    pub(crate) fn authenticate_request<Body>(
        &self,
        mut request: Request<Body>,
    ) -> Result<Request<Body>, AuthError> {
        let token = match self.token_extractor.extract_token(request.headers()) {
            Ok(token) => token,
            Err(e) => {
                debug!("Token extraction failed: {}", e);
                return Err(e);
            }
        };
        let raw_claims: Value = match token.claims() {
            Some(claims) => claims,
            None => {
                debug!("Token payload could not be decoded");
                return Err(AuthError::ParseTokenError);
            }
        };
        match self.converter.convert(&raw_claims, token.as_str()) {
            Ok(principal) => {
                debug!("Authenticated principal '{}'", principal.name());
                request.extensions_mut().insert(principal);
                Ok(request)
            }
            Err(e) => {
                debug!("Principal conversion failed: {}", e);
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for BearerAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthenticator").finish()
    }
}

impl BearerAuthenticator {
    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html).
    pub fn into_layer<ResBody>(&self) -> PrincipalLayer<ResBody>
    where
        ResBody: Default,
    {
        PrincipalLayer::new(self.clone(), Arc::new(DefaultErrorHandler))
    }

    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html) that uses a custom [ErrorHandler] implementation.
    pub fn into_layer_with_error_handler<ResBody>(
        &self,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> PrincipalLayer<ResBody> {
        PrincipalLayer::new(self.clone(), error_handler)
    }
}
