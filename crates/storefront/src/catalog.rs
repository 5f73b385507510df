//! Static product catalog.
//!
//! The catalog ships with the client; prices are denominated in the base
//! currency and converted for display by [`crate::currency`].

use std::sync::LazyLock;

use rust_decimal::Decimal;

use monsoon_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    /// Unit price in the base currency.
    pub price: Decimal,
    pub image: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Classic Sneakers",
            price: Decimal::from(3499),
            image: "https://images.unsplash.com/photo-1549298916-b41d501d3772",
            description: "Minimalist everyday sneakers perfect for any occasion",
            category: "shoes",
        },
        Product {
            id: ProductId::new(2),
            name: "Denim Jeans",
            price: Decimal::from(2900),
            image: "https://images.unsplash.com/photo-1576995853123-5a10305d93c0",
            description: "Classic denim jeans with modern fit",
            category: "clothing",
        },
        Product {
            id: ProductId::new(3),
            name: "Leather Bag",
            price: Decimal::from(8999),
            image: "https://images.unsplash.com/photo-1548036328-c9fa89d128fa",
            description: "Handcrafted leather bag for everyday use",
            category: "accessories",
        },
        Product {
            id: ProductId::new(4),
            name: "Cotton T-Shirt",
            price: Decimal::from(1499),
            image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab",
            description: "Premium cotton basic tee",
            category: "clothing",
        },
        Product {
            id: ProductId::new(5),
            name: "Smart Watch",
            price: Decimal::from(15_599),
            image: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a",
            description: "Modern smartwatch with health tracking features",
            category: "accessories",
        },
        Product {
            id: ProductId::new(6),
            name: "Sunglasses",
            price: Decimal::from(4399),
            image: "https://images.unsplash.com/photo-1572635196237-14b3f281503f",
            description: "Classic aviator sunglasses",
            category: "accessories",
        },
        Product {
            id: ProductId::new(7),
            name: "Leather Wallet",
            price: Decimal::from(1459),
            image: "https://images.unsplash.com/photo-1627123424574-724758594e93",
            description: "Genuine leather wallet with multiple card slots",
            category: "accessories",
        },
        Product {
            id: ProductId::new(8),
            name: "Wired Headphones",
            price: Decimal::from(7999),
            image: "https://images.unsplash.com/photo-1583394838336-acd977736f90",
            description: "Premium headphones with noise cancellation and deep bass",
            category: "electronics",
        },
    ]
});

/// All catalog products.
#[must_use]
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Look up a product by id.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.id == id)
}
