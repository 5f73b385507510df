//! Display currencies and country resolution.
//!
//! Catalog prices are denominated in the base currency (INR); the display
//! currency is resolved from the shopper's profile country. Each currency
//! carries its own symbol and digit-grouping rules.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Countries whose display currency is the euro.
const EURO_COUNTRIES: &[&str] = &[
    "Austria",
    "Belgium",
    "Cyprus",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Ireland",
    "Italy",
    "Latvia",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Netherlands",
    "Portugal",
    "Slovakia",
    "Slovenia",
    "Spain",
];

/// ISO 4217 display currencies supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee - the base currency for catalog prices.
    #[default]
    Inr,
    /// US dollar.
    Usd,
    /// British pound.
    Gbp,
    /// Euro.
    Eur,
    /// Australian dollar.
    Aud,
}

impl Currency {
    /// All supported currencies.
    pub const ALL: [Self; 5] = [Self::Inr, Self::Usd, Self::Gbp, Self::Eur, Self::Aud];

    /// The ISO 4217 currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Aud => "AUD",
        }
    }

    /// The display symbol, prefixed to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Eur => "€",
            Self::Aud => "A$",
        }
    }

    /// Human-readable currency name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inr => "Indian Rupee",
            Self::Usd => "US Dollar",
            Self::Gbp => "British Pound",
            Self::Eur => "Euro",
            Self::Aud => "Australian Dollar",
        }
    }

    /// The countries this currency is displayed for.
    #[must_use]
    pub const fn countries(self) -> &'static [&'static str] {
        match self {
            Self::Inr => &["India"],
            Self::Usd => &["United States"],
            Self::Gbp => &["United Kingdom"],
            Self::Eur => EURO_COUNTRIES,
            Self::Aud => &["Australia"],
        }
    }

    /// Resolve the display currency for a country name.
    ///
    /// Returns `None` for countries outside the supported set; callers fall
    /// back to the base currency.
    #[must_use]
    pub fn from_country(country: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.countries().contains(&country))
    }

    /// Format an amount in this currency.
    ///
    /// Rounds to exactly two fraction digits and applies the currency's digit
    /// grouping: Indian lakh/crore grouping for INR, thousands grouping
    /// otherwise. The symbol is prefixed.
    #[must_use]
    pub fn format(self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let grouped = match self {
            Self::Inr => group_indian(int_part),
            _ => group_thousands(int_part),
        };
        format!("{sign}{}{grouped}.{frac_part}", self.symbol())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported currency code: {s}"))
    }
}

/// Group an ASCII digit string in threes: `1234567` → `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Group an ASCII digit string in the Indian style: the last three digits,
/// then twos: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(len - 3);
    let head_len = head.len();
    let mut out = String::with_capacity(len + 1 + head_len / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_country() {
        assert_eq!(Currency::from_country("India"), Some(Currency::Inr));
        assert_eq!(
            Currency::from_country("United Kingdom"),
            Some(Currency::Gbp)
        );
        assert_eq!(Currency::from_country("Germany"), Some(Currency::Eur));
        assert_eq!(Currency::from_country("Australia"), Some(Currency::Aud));
        assert_eq!(Currency::from_country("Narnia"), None);
    }

    #[test]
    fn test_from_str_codes() {
        assert_eq!("INR".parse::<Currency>().unwrap(), Currency::Inr);
        assert_eq!("gbp".parse::<Currency>().unwrap(), Currency::Gbp);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_format_thousands_grouping() {
        assert_eq!(Currency::Usd.format(Decimal::from(1_234_567)), "$1,234,567.00");
        assert_eq!(Currency::Gbp.format(Decimal::new(20000, 2)), "£200.00");
        assert_eq!(Currency::Aud.format(Decimal::from(999)), "A$999.00");
    }

    #[test]
    fn test_format_indian_grouping() {
        assert_eq!(Currency::Inr.format(Decimal::from(1_234_567)), "₹12,34,567.00");
        assert_eq!(Currency::Inr.format(Decimal::from(123_456)), "₹1,23,456.00");
        assert_eq!(Currency::Inr.format(Decimal::from(1000)), "₹1,000.00");
        assert_eq!(Currency::Inr.format(Decimal::from(999)), "₹999.00");
    }

    #[test]
    fn test_format_always_two_fraction_digits() {
        assert_eq!(Currency::Usd.format(Decimal::from(5)), "$5.00");
        assert_eq!(Currency::Usd.format(Decimal::new(55, 1)), "$5.50");
        assert_eq!(Currency::Usd.format(Decimal::new(5555, 3)), "$5.56");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(Currency::Eur.format(Decimal::from(-1500)), "-€1,500.00");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"GBP\"");
        let parsed: Currency = serde_json::from_str("\"AUD\"").unwrap();
        assert_eq!(parsed, Currency::Aud);
    }
}
