//! Exchange-rate caching, TTL, and degraded fallbacks.

use std::time::Duration;

use monsoon_integration_tests::support::TestContext;
use monsoon_storefront::{CachedRate, RateSource, StateStore};
use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn gbp_rates() -> serde_json::Value {
    serde_json::json!({ "base": "INR", "rates": { "GBP": 0.0094, "USD": 0.012, "AUD": 0.018 } })
}

#[tokio::test]
async fn fresh_rate_is_cached_within_the_ttl() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gbp_rates()))
        .expect(1) // the second quote must come from cache
        .mount(&ctx.rates)
        .await;

    let first = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    assert_eq!(first.source, RateSource::Fresh);
    assert!((first.rate - 0.0094).abs() < f64::EPSILON);

    let second = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    assert_eq!(second.source, RateSource::Cached);

    // Exactly two fraction digits and the GBP symbol.
    assert_eq!(second.format(Decimal::from(3499)), "£32.89");
}

#[tokio::test]
async fn persisted_rate_survives_a_restart() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gbp_rates()))
        .expect(1)
        .mount(&ctx.rates)
        .await;

    let quote = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    assert_eq!(quote.source, RateSource::Fresh);

    // A fresh storefront over the same state file reuses the entry without
    // a network call.
    let restarted = ctx.restart();
    let quote = restarted.currency().quote(Some("United Kingdom")).await;
    assert_eq!(quote.source, RateSource::Cached);
}

#[tokio::test]
async fn expired_entry_triggers_a_refetch() {
    let ctx = TestContext::with_config(|config| {
        config.rate_ttl = Duration::from_secs(1);
    })
    .await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gbp_rates()))
        .expect(2)
        .mount(&ctx.rates)
        .await;

    let quote = ctx.storefront.currency().quote(Some("Australia")).await;
    assert_eq!(quote.source, RateSource::Fresh);

    tokio::time::sleep(Duration::from_millis(1200)).await;

    let quote = ctx.storefront.currency().quote(Some("Australia")).await;
    assert_eq!(quote.source, RateSource::Fresh);
}

#[tokio::test]
async fn failed_refresh_falls_back_to_the_stale_entry() {
    let ctx = TestContext::new().await;
    // An entry two hours old: expired, but the best available fallback.
    StateStore::open_at(ctx.state_path())
        .expect("state store")
        .put_rate(
            "INR_GBP",
            CachedRate {
                rate: 0.0091,
                fetched_at: chrono::Utc::now().timestamp() - 7200,
            },
        )
        .expect("seed rate");
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.rates)
        .await;

    let storefront = ctx.restart();
    let quote = storefront.currency().quote(Some("United Kingdom")).await;
    assert_eq!(quote.source, RateSource::Stale);
    assert!((quote.rate - 0.0091).abs() < f64::EPSILON);
    assert!(quote.advisory.is_some());
}

#[tokio::test]
async fn failed_refresh_without_cache_uses_the_neutral_rate() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.rates)
        .await;

    let quote = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    assert_eq!(quote.source, RateSource::Neutral);
    assert!((quote.rate - 1.0).abs() < f64::EPSILON);
    let advisory = quote.advisory.as_deref().expect("advisory");
    assert!(advisory.contains("Could not fetch live rates"));

    // Prices render unconverted alongside the advisory.
    assert_eq!(quote.format(Decimal::from(100)), "£100.00");
}

#[tokio::test]
async fn missing_target_code_counts_as_a_failed_fetch() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "base": "INR", "rates": { "USD": 0.012 } })),
        )
        .mount(&ctx.rates)
        .await;

    let quote = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    assert_eq!(quote.source, RateSource::Neutral);
    assert!(quote.advisory.is_some());
}

#[tokio::test]
async fn uk_shopper_sees_gbp_totals() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gbp_rates()))
        .mount(&ctx.rates)
        .await;

    // A cart of [{price: 100, qty: 2}] in the base currency.
    let quote = ctx
        .storefront
        .currency()
        .quote(Some("United Kingdom"))
        .await;
    let total = quote.format(Decimal::from(100) * Decimal::from(2));
    assert_eq!(total, "£1.88");
    assert_eq!(quote.currency.symbol(), "£");
}
