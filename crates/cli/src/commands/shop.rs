//! Browsing commands: products and order history.

use monsoon_storefront::{Storefront, catalog};

/// List catalog products with prices converted to the shopper's currency.
///
/// Works logged out too; prices then show in the base currency.
///
/// # Errors
///
/// Currently infallible beyond the boxed signature; rate-fetch problems
/// degrade to an advisory line instead of failing.
pub async fn products(storefront: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    // Restores the session if a valid token is persisted, so the shopper's
    // country drives the display currency.
    let _ = storefront.session().initialize().await;

    let mut advisory = None;
    for product in catalog::products() {
        let (formatted, quote) = storefront.convert_price(product.price).await;
        advisory = advisory.or(quote.advisory);
        println!("{:>3}  {:<20} {:>14}  {}", product.id, product.name, formatted, product.description);
    }
    if let Some(advisory) = advisory {
        println!("note: {advisory}");
    }
    Ok(())
}

/// Show the shopper's order history, grouped by order.
///
/// # Errors
///
/// Returns an error if no session can be restored or the fetch fails.
pub async fn orders(storefront: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    if storefront.session().initialize().await.is_none() {
        return Err("not logged in".into());
    }

    let orders = storefront.order_history().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in orders {
        let date = order
            .created_at
            .map_or_else(|| "unknown date".to_owned(), |dt| dt.format("%d %b %Y").to_string());
        println!("Order #{} - {date} - {}", order.id, order.status);
        for item in &order.items {
            println!(
                "  {} x{}  @ {}{:.2}",
                item.name, item.quantity, order.currency, item.unit_price
            );
        }
        println!("  Total: {}{:.2}", order.currency, order.total);
    }
    Ok(())
}
