//! Currency conversion with a TTL rate cache.
//!
//! Rates are quoted relative to the fixed base currency and cached for an
//! hour, both in memory (moka) and in the persisted state store. A failed
//! refresh falls back to the last known rate for the pair, then to the
//! neutral rate 1.0, and surfaces an advisory string instead of an error:
//! the storefront keeps rendering prices either way.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use monsoon_core::{Currency, Price};

use crate::api::RatesClient;
use crate::store::StateStore;

/// Advisory shown alongside prices when live rates are unavailable.
const RATE_FETCH_ADVISORY: &str = "Could not fetch live rates. Using last known rate.";

/// A cached exchange rate for one `(base, target)` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CachedRate {
    /// Units of target currency per unit of base currency.
    pub rate: f64,
    /// Unix timestamp of the fetch that produced this rate.
    pub fetched_at: i64,
}

/// Where a quoted rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Base and target are the same currency; no rate involved.
    Identity,
    /// Fetched from the exchange-rate service on this call.
    Fresh,
    /// Reused from a cache entry younger than the TTL.
    Cached,
    /// Refresh failed; the last known (expired) entry was reused.
    Stale,
    /// Refresh failed with no cached entry; prices are unconverted.
    Neutral,
}

/// A resolved display rate.
#[derive(Debug, Clone)]
pub struct RateQuote {
    /// The display currency.
    pub currency: Currency,
    /// Units of display currency per unit of base currency.
    pub rate: f64,
    /// Where the rate came from.
    pub source: RateSource,
    /// Non-fatal degradation notice for display next to prices, set when
    /// the rate is stale or neutral.
    pub advisory: Option<String>,
}

impl RateQuote {
    /// Convert a base-currency amount into the quote's currency, rounded to
    /// two fraction digits.
    #[must_use]
    pub fn convert(&self, amount: Decimal) -> Price {
        let rate = Decimal::from_f64(self.rate).unwrap_or(Decimal::ONE);
        let converted =
            (amount * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Price::new(converted, self.currency)
    }

    /// Convert and format a base-currency amount for display.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        self.convert(amount).display()
    }
}

/// Resolves display currencies and caches exchange rates.
///
/// Cheaply cloneable; clones share the same caches.
#[derive(Clone)]
pub struct CurrencyConverter {
    inner: Arc<ConverterInner>,
}

struct ConverterInner {
    rates: RatesClient,
    store: StateStore,
    base: Currency,
    ttl: Duration,
    cache: Cache<String, CachedRate>,
}

impl CurrencyConverter {
    /// Create a converter over a rates client and persisted store.
    #[must_use]
    pub fn new(rates: RatesClient, store: StateStore, base: Currency, ttl: Duration) -> Self {
        // No time_to_live on the moka cache: entries older than the TTL must
        // stay retrievable as the fallback when a refresh fails. Freshness
        // is decided against `fetched_at` in `quote_currency`.
        let cache = Cache::builder().max_capacity(64).build();
        Self {
            inner: Arc::new(ConverterInner {
                rates,
                store,
                base,
                ttl,
                cache,
            }),
        }
    }

    /// The currency catalog prices are denominated in.
    #[must_use]
    pub fn base_currency(&self) -> Currency {
        self.inner.base
    }

    /// Resolve the display currency for a shopper country. Unknown or
    /// absent countries fall back to the base currency.
    #[must_use]
    pub fn resolve_currency(&self, country: Option<&str>) -> Currency {
        country
            .and_then(Currency::from_country)
            .unwrap_or(self.inner.base)
    }

    /// Quote the display rate for a shopper country.
    pub async fn quote(&self, country: Option<&str>) -> RateQuote {
        self.quote_currency(self.resolve_currency(country)).await
    }

    /// Quote the rate from the base currency into `target`.
    ///
    /// Never fails: degraded outcomes carry an advisory instead.
    pub async fn quote_currency(&self, target: Currency) -> RateQuote {
        let base = self.inner.base;
        if target == base {
            return RateQuote {
                currency: target,
                rate: 1.0,
                source: RateSource::Identity,
                advisory: None,
            };
        }

        let key = rate_key(base, target);
        let cached = self.lookup(&key).await;

        if let Some(entry) = cached {
            let age = Utc::now().timestamp() - entry.fetched_at;
            if age < self.ttl_secs() {
                debug!(%key, age, "exchange rate cache hit");
                return RateQuote {
                    currency: target,
                    rate: entry.rate,
                    source: RateSource::Cached,
                    advisory: None,
                };
            }
        }

        match self.fetch(base, target, &key).await {
            Ok(rate) => RateQuote {
                currency: target,
                rate,
                source: RateSource::Fresh,
                advisory: None,
            },
            Err(error) => {
                warn!(%key, %error, "exchange rate refresh failed");
                cached.map_or_else(
                    || RateQuote {
                        currency: target,
                        rate: 1.0,
                        source: RateSource::Neutral,
                        advisory: Some(RATE_FETCH_ADVISORY.to_owned()),
                    },
                    |entry| RateQuote {
                        currency: target,
                        rate: entry.rate,
                        source: RateSource::Stale,
                        advisory: Some(RATE_FETCH_ADVISORY.to_owned()),
                    },
                )
            }
        }
    }

    /// Convert a base-currency amount for display with a country's rate.
    pub async fn convert_price(&self, amount: Decimal, country: Option<&str>) -> (String, RateQuote) {
        let quote = self.quote(country).await;
        (quote.format(amount), quote)
    }

    /// Cached entry for a key: memory first, then the persisted store
    /// (promoting a hit into memory).
    async fn lookup(&self, key: &str) -> Option<CachedRate> {
        if let Some(entry) = self.inner.cache.get(key).await {
            return Some(entry);
        }
        let entry = self.inner.store.rate(key)?;
        self.inner.cache.insert(key.to_owned(), entry).await;
        Some(entry)
    }

    /// Fetch a fresh rate and record it in both cache layers.
    async fn fetch(&self, base: Currency, target: Currency, key: &str) -> Result<f64, String> {
        let rates = self
            .inner
            .rates
            .latest(base)
            .await
            .map_err(|e| e.to_string())?;
        let rate = rates
            .get(target.code())
            .copied()
            .ok_or_else(|| format!("{} missing from rates response", target.code()))?;

        let entry = CachedRate {
            rate,
            fetched_at: Utc::now().timestamp(),
        };
        self.inner.cache.insert(key.to_owned(), entry).await;
        if let Err(error) = self.inner.store.put_rate(key, entry) {
            warn!(%key, %error, "failed to persist rate entry");
        }
        debug!(%key, rate, "exchange rate refreshed");
        Ok(rate)
    }

    fn ttl_secs(&self) -> i64 {
        i64::try_from(self.inner.ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Cache key for a currency pair, e.g. `INR_GBP`.
fn rate_key(base: Currency, target: Currency) -> String {
    format!("{}_{}", base.code(), target.code())
}
