use http::{header::WWW_AUTHENTICATE, HeaderValue, Response, StatusCode};

use crate::error::AuthError;

/// Maps authentication failures to HTTP responses.
pub trait ErrorHandler<B>: Send + Sync {
    fn map_error(&self, error: AuthError) -> Response<B>;
}

/// Responds 401 to every failure, with a `WWW-Authenticate: Bearer`
/// challenge when the `Authorization` header was missing or malformed.
pub struct DefaultErrorHandler;

impl<B> ErrorHandler<B> for DefaultErrorHandler
where
    B: Default,
{
    fn map_error(&self, error: AuthError) -> Response<B> {
        let mut response = Response::new(B::default());
        *response.status_mut() = StatusCode::UNAUTHORIZED;
        if error == AuthError::MissingAuthorizationHeader
            || error == AuthError::InvalidAuthorizationHeader
        {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(error: AuthError) -> Response<String> {
        DefaultErrorHandler.map_error(error)
    }

    #[test]
    fn challenges_on_missing_header() {
        let response = handle(AuthError::MissingAuthorizationHeader);

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Bearer"))
        );
    }

    #[test]
    fn no_challenge_on_parse_failure() {
        let response = handle(AuthError::ParseTokenError);

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(WWW_AUTHENTICATE), None);
    }
}
