//! Shared helpers for the integration tests.

use std::time::Duration;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use monsoon_storefront::{Storefront, StorefrontConfig};

/// A storefront wired to mock services and a temporary state file.
pub struct TestContext {
    pub storefront: Storefront,
    pub auth: MockServer,
    pub orders: MockServer,
    pub rates: MockServer,
    // Keeps the state directory alive for the test's duration.
    _state_dir: tempfile::TempDir,
}

impl TestContext {
    /// Start mock services and build a storefront against them.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`Self::new`], with a hook to tweak the configuration.
    pub async fn with_config(tweak: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let auth = MockServer::start().await;
        let orders = MockServer::start().await;
        let rates = MockServer::start().await;
        let state_dir = tempfile::tempdir().expect("temp dir");

        let mut config = StorefrontConfig {
            auth_url: url::Url::parse(&auth.uri()).expect("auth url"),
            orders_url: url::Url::parse(&orders.uri()).expect("orders url"),
            rates_url: url::Url::parse(&rates.uri()).expect("rates url"),
            request_timeout: Duration::from_secs(2),
            state_path: Some(state_dir.path().join("state.json")),
            ..StorefrontConfig::default()
        };
        tweak(&mut config);

        let storefront = Storefront::new(config).expect("storefront");
        Self {
            storefront,
            auth,
            orders,
            rates,
            _state_dir: state_dir,
        }
    }

    /// The path of the persisted state file.
    #[must_use]
    pub fn state_path(&self) -> std::path::PathBuf {
        self.storefront
            .config()
            .state_path
            .clone()
            .expect("test config always sets a state path")
    }

    /// Rebuild the storefront over the same services and state file, as a
    /// fresh process start would.
    #[must_use]
    pub fn restart(&self) -> Storefront {
        Storefront::new(self.storefront.config().clone()).expect("storefront")
    }

    /// Mount a standard login + profile pair on the auth server.
    pub async fn mount_login(&self, token: &str, profile: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": token })),
            )
            .mount(&self.auth)
            .await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile))
            .mount(&self.auth)
            .await;
    }
}

/// A signed token whose `exp` lies `secs_from_now` seconds away (negative
/// for the past).
#[must_use]
pub fn bearer_token(secs_from_now: i64) -> String {
    let exp = chrono::Utc::now().timestamp() + secs_from_now;
    encode(
        &Header::default(),
        &json!({ "sub": "jane@example.com", "exp": exp }),
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .expect("token")
}

/// Profile body with the full shipping profile for `country`.
#[must_use]
pub fn profile_body(country: &str) -> serde_json::Value {
    json!({
        "email": "jane@example.com",
        "first_name": "Jane",
        "last_name": "Doe",
        "profile": {
            "country": country,
            "contact_number": "+44 20 7946 0000",
            "pincode": "SW1A 1AA",
            "address_line1": "1 Baker Street",
            "city": "London",
            "state": "Greater London"
        }
    })
}
