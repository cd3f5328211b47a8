use std::{error::Error, fmt::Display};

/// Error of the pure conversion core.
#[derive(Clone, Debug, PartialEq)]
pub enum ConvertError {
    /// The raw claims input is structurally unusable (null or not an
    /// object). Retrying with the same input cannot succeed.
    InvalidTokenFormat,
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for ConvertError {}

/// Errors of the middleware surface.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    /// The bearer token's payload segment could not be decoded.
    ParseTokenError,
    /// The decoded payload is not a claim object.
    InvalidTokenFormat,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for AuthError {}

impl From<ConvertError> for AuthError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::InvalidTokenFormat => AuthError::InvalidTokenFormat,
        }
    }
}
