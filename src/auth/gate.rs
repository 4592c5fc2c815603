//! Request authentication gate.
//!
//! Any handler that takes an [`AuthenticatedUser`] argument is protected: the
//! extractor below pulls the bearer token from the request, verifies it, and
//! either hands the handler the resolved user or rejects the request before
//! the handler runs.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderMap;
use tracing::debug;

use super::error::AuthenticationError;
use crate::models::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Parses `Authorization: Bearer <token>`. The header is split at the first
/// space; the scheme is matched case-insensitively and everything after it is
/// the token, passed on as is for the identity service to judge. A missing
/// header, another scheme, or an empty token counts as missing credentials.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthenticationError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    match auth_header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthenticationError::MissingCredentials),
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = HTTPError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<AuthenticatedUser, HTTPError> {
        let token = extract_bearer_token(&parts.headers).inspect_err(|_| {
            debug!(
                method = %parts.method,
                path = parts.uri.path(),
                "Request carries no bearer credentials"
            );
        })?;

        let user = state.verifier.verify_token(token).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bearer token123");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "token123");
    }

    #[test]
    fn test_token_with_spaces_is_forwarded() {
        let headers = headers_with("Bearer a b");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "a b");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthenticationError::MissingCredentials)
        ));
        for value in ["Bearer", "Bearer   ", "Basic dXNlcjpwYXNz", "token-only"] {
            assert!(
                matches!(
                    extract_bearer_token(&headers_with(value)),
                    Err(AuthenticationError::MissingCredentials)
                ),
                "expected '{}' to be rejected",
                value
            );
        }
    }
}
