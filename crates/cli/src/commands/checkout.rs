//! Checkout command.

use monsoon_core::ProductId;
use monsoon_storefront::{CheckoutError, Storefront, StorefrontError, catalog};

/// Build a cart from `product_id=quantity` pairs and submit the checkout.
///
/// # Errors
///
/// Returns an error for malformed line specs, unknown products, or any
/// failed checkout precondition or submission.
pub async fn checkout(
    storefront: &Storefront,
    lines: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    if storefront.session().initialize().await.is_none() {
        return Err("please log in to complete checkout".into());
    }

    for spec in lines {
        let (id, quantity) = parse_line(spec)?;
        let product = catalog::find(id).ok_or_else(|| format!("unknown product id: {id}"))?;
        storefront.cart().add(product);
        storefront.cart().set_quantity(id, quantity);
    }

    match storefront.checkout().submit().await {
        Ok(receipt) => {
            println!(
                "Order placed: {} line(s), {} charged.",
                receipt.lines_submitted, receipt.total
            );
            Ok(())
        }
        Err(CheckoutError::ProfileIncomplete(missing)) => {
            println!("Missing required information:");
            for label in &missing {
                println!("  - {label}");
            }
            println!("Run `monsoon profile update` to fill these in.");
            Err(Box::new(StorefrontError::Checkout(
                CheckoutError::ProfileIncomplete(missing),
            )))
        }
        Err(other) => Err(Box::new(StorefrontError::Checkout(other))),
    }
}

/// Parse a `product_id=quantity` line spec.
fn parse_line(spec: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got: {spec}"))?;
    let id: i32 = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid product id in: {spec}"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in: {spec}"))?;
    Ok((ProductId::new(id), quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("1=2").unwrap(), (ProductId::new(1), 2));
        assert_eq!(parse_line(" 4 = 0 ").unwrap(), (ProductId::new(4), 0));
        assert!(parse_line("nope").is_err());
        assert!(parse_line("1=many").is_err());
        assert!(parse_line("x=1").is_err());
    }
}
