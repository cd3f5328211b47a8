#![doc = include_str!("../README.md")]

/// [ClaimSet](crate::claims::ClaimSet) is the normalized, immutable
/// view over a token's claims, with typed accessors for the standard
/// OIDC fields and raw lookup for everything else.
///
/// [ClaimsNormalizer](crate::claims::ClaimsNormalizer) is the seam for
/// customizing how raw claims become a [ClaimSet](crate::claims::ClaimSet);
/// [OpenidClaimsNormalizer](crate::claims::OpenidClaimsNormalizer) is
/// the lenient default.
pub mod claims;

/// [Authority](crate::authorities::Authority) is an opaque role/capability
/// string, and [AuthoritiesExtractor](crate::authorities::AuthoritiesExtractor)
/// the seam for deriving a set of them from a normalized claim set.
///
/// Extractors always see normalized claims, never the raw mapping.
/// Built-ins:
/// [FlatClaimExtractor](crate::authorities::FlatClaimExtractor),
/// [NestedRolesExtractor](crate::authorities::NestedRolesExtractor) and
/// [StaticAuthoritiesExtractor](crate::authorities::StaticAuthoritiesExtractor).
pub mod authorities;

/// [Principal](crate::principal::Principal) is the authenticated
/// identity: claim set, authorities and the verbatim bearer token.
pub mod principal;

/// [PrincipalConverter](crate::converter::PrincipalConverter) is the
/// pure conversion core: raw claims + bearer token in, immutable
/// [Principal](crate::principal::Principal) out.
pub mod converter;

/// Builder used to construct a
/// [PrincipalConverter](crate::converter::PrincipalConverter) with
/// custom collaborators.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tower_oidc_principal::authorities::FlatClaimExtractor;
/// use tower_oidc_principal::converter::PrincipalConverter;
///
/// let converter = PrincipalConverter::builder()
///     .authorities_extractor(Arc::new(FlatClaimExtractor::new("scope")))
///     .build();
/// ```
pub mod builder;

/// [BearerAuthenticator](crate::authenticator::BearerAuthenticator)
/// underpins the tower middleware: it extracts the bearer token,
/// decodes its (already verified) payload, runs the converter and
/// attaches the principal to the request.
pub mod authenticator;

/// The actual tower middleware.
///
/// Contains implementations of [Service](https://docs.rs/tower/latest/tower/trait.Service.html)
/// and [Layer](https://docs.rs/tower/latest/tower/trait.Layer.html)
/// from the tower library.
///
/// You shouldn't need to interact with these implementations, more than
/// calling [BearerAuthenticator::into_layer()](crate::authenticator::BearerAuthenticator::into_layer).
pub mod layer;

/// [BearerToken](crate::token::BearerToken) wraps a compact token and
/// decodes its payload segment without verifying anything.
pub mod token;

/// [TokenExtractor](crate::token_extract::TokenExtractor) is the seam
/// for pulling the bearer token out of request headers;
/// [BearerHeaderTokenExtractor](crate::token_extract::BearerHeaderTokenExtractor)
/// reads the `Authorization` header.
pub mod token_extract;

/// Error types: [ConvertError](crate::error::ConvertError) for the pure
/// core, [AuthError](crate::error::AuthError) for the middleware.
pub mod error;

/// [ErrorHandler](crate::error_handler::ErrorHandler) customizes the
/// HTTP response produced on authentication failure.
pub mod error_handler;

/// Explicit test fixtures replacing annotation-driven mocks: build a
/// [Principal](crate::principal::Principal) directly from test setup
/// code.
pub mod test_support;
