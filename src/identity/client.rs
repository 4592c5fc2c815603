use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::error::{IdentityError, LifecycleError};
use crate::config::Settings;
use crate::models::AuthenticatedUser;

/// A connection handle to the identity service's auth API (`{service_url}/auth/v1`).
///
/// The secret key is installed once as the `apikey` default header; it is also
/// the bearer for administrative calls.
pub struct IdentityClient {
    http: Client,
    base_url: Url,
    service_bearer: HeaderValue,
}

impl IdentityClient {
    /// Builds the client from settings and checks the service answers its health endpoint.
    pub async fn connect(settings: &Settings) -> Result<Self, LifecycleError> {
        if !settings.has_identity_service() {
            return Err(LifecycleError::Misconfigured(
                "service_url and service_secret_key must both be set".to_string(),
            ));
        }

        let base_url = Url::parse(settings.service_url.trim()).map_err(|e| {
            LifecycleError::Misconfigured(format!("invalid service_url: {}", e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LifecycleError::Misconfigured(format!(
                "service_url '{}' cannot carry a path",
                base_url
            )));
        }

        let mut apikey = HeaderValue::from_str(&settings.service_secret_key).map_err(|_| {
            LifecycleError::Misconfigured("service_secret_key is not a valid header value".into())
        })?;
        apikey.set_sensitive(true);
        let mut service_bearer =
            HeaderValue::from_str(&format!("Bearer {}", settings.service_secret_key)).map_err(
                |_| LifecycleError::Misconfigured("service_secret_key is not a valid header value".into()),
            )?;
        service_bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|e| {
                LifecycleError::Misconfigured(format!("failed to build HTTP client: {}", e))
            })?;

        let client = Self {
            http,
            base_url,
            service_bearer,
        };
        client.handshake().await?;
        Ok(client)
    }

    /// Base URL the client was built for.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn handshake(&self) -> Result<(), LifecycleError> {
        let url = self.endpoint(&["health"]);
        debug!("Sending identity service health request to: {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LifecycleError::Handshake(format!("error sending request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(LifecycleError::Handshake(format!(
                "unexpected status code: {}",
                response.status()
            )))
        }
    }

    /// Resolves a bearer token to the user it was issued for.
    ///
    /// `Ok(None)` means the service answered but named no user.
    pub async fn get_user(&self, token: &str) -> Result<Option<AuthenticatedUser>, IdentityError> {
        let url = self.endpoint(&["user"]);
        debug!("Sending identity service user request to: {}", url);
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;
        if body.is_null() {
            return Ok(None);
        }
        let user: AuthenticatedUser =
            serde_json::from_value(body).map_err(|e| IdentityError::Decode(e.to_string()))?;
        if user.id.is_empty() {
            Ok(None)
        } else {
            Ok(Some(user))
        }
    }

    /// Issues the administrative delete for `user_id`.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), IdentityError> {
        let url = self.endpoint(&["admin", "users", user_id]);
        debug!("Sending identity service delete request to: {}", url);
        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, self.service_bearer.clone())
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// `{base}/auth/v1/<segments...>`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("auth").push("v1").extend(segments);
        }
        url
    }
}

async fn check_status(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = upstream_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    Err(IdentityError::Rejected { status, message })
}

/// Pulls the human-readable message out of an error body. The service is not
/// consistent about which field it uses.
fn upstream_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(Value::String(text)) = map.get(key) {
                return Some(text.clone());
            }
        }
    }
    Some(trimmed.to_string())
}
