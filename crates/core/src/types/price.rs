//! Price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// An amount of money in a specific currency.
///
/// Amounts are kept in the currency's standard unit (rupees, dollars), not
/// the minor unit. Display always rounds to two fraction digits with the
/// currency's own grouping rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// The currency the amount is denominated in.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display, e.g. `₹1,23,456.00` or `£19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        self.currency.format(self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(349_900, 2), Currency::Inr);
        assert_eq!(price.to_string(), "₹3,499.00");

        let price = Price::new(Decimal::new(1999, 2), Currency::Gbp);
        assert_eq!(price.to_string(), "£19.99");
    }
}
