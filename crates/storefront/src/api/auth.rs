//! Authentication service client.
//!
//! Covers login, registration, and profile reads/writes. All profile
//! operations are bearer-token authenticated; 401 handling (forced logout)
//! is the session manager's job, not this client's.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiError, error_for_status};
use crate::config::StorefrontConfig;
use crate::models::{ProfileUpdate, User};

/// Client for the remote authentication service.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

impl AuthClient {
    /// Create a new auth service client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                client: reqwest::Client::new(),
                base_url: config.auth_url.as_str().trim_end_matches('/').to_owned(),
                timeout: config.request_timeout,
            }),
        }
    }

    /// Log in with email and password, returning the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 401 for bad credentials, or a
    /// transport error.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/login", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let body: LoginResponse = response.json().await.map_err(ApiError::from_transport)?;
        debug!(email, "login accepted");
        Ok(body.access_token)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` (409 for an already-registered email) or a
    /// transport error.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), ApiError> {
        let url = format!("{}/register", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .json(&RegisterRequest {
                email,
                password,
                first_name,
                last_name,
            })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        Ok(())
    }

    /// Fetch the shopper's identity and profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 401 for an expired or revoked
    /// token, or a transport error.
    pub async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        let url = format!("{}/profile", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .timeout(self.inner.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let user: User = response.json().await.map_err(ApiError::from_transport)?;
        Ok(user)
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 401 for an expired or revoked
    /// token, or a transport error.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let url = format!("{}/profile", self.inner.base_url);
        let response = self
            .inner
            .client
            .put(&url)
            .timeout(self.inner.timeout)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> StorefrontConfig {
        StorefrontConfig {
            auth_url: url::Url::parse(&server.uri()).unwrap(),
            ..StorefrontConfig::default()
        }
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json_string(
                "{\"email\":\"jane@example.com\",\"password\":\"Secret#123\"}",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(
                    "{\"access_token\":\"abc.def.ghi\"}",
                    "application/json",
                ),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(&config_for(&server));
        let token = client.login("jane@example.com", "Secret#123").await.unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_login_surfaces_detail_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_raw("{\"detail\":\"Invalid credentials\"}", "application/json"),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(&config_for(&server));
        let err = client.login("jane@example.com", "wrong").await.unwrap_err();
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, 401);
                assert_eq!(detail, "Invalid credentials");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_profile_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "{\"email\":\"jane@example.com\",\"first_name\":\"Jane\",\
                 \"last_name\":\"Doe\",\"profile\":{\"country\":\"India\"}}",
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = AuthClient::new(&config_for(&server));
        let user = client.fetch_profile("tok-123").await.unwrap();
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.country(), Some("India"));
    }
}
