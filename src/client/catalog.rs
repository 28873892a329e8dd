use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{Product, ProductStatus};

/// Stock below this counts as "low" on the dashboard.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

const TOP_CATEGORIES_LIMIT: usize = 6;

/// Dashboard numbers, derived on the client from the cached product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    pub categories: usize,
    /// Σ price × stock, exact decimal arithmetic.
    pub total_value: Decimal,
}

pub fn product_stats(products: &[Product]) -> InventoryStats {
    let mut categories: Vec<&str> = products
        .iter()
        .filter_map(|p| p.category.as_deref())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    InventoryStats {
        total_products: products.len(),
        active_products: products
            .iter()
            .filter(|p| p.status == ProductStatus::Active)
            .count(),
        low_stock_products: products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .count(),
        out_of_stock_products: products.iter().filter(|p| p.stock == 0).count(),
        categories: categories.len(),
        total_value: products
            .iter()
            .map(|p| p.price * Decimal::from(p.stock))
            .sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// Most-populated categories first, capped at six for the dashboard grid.
pub fn top_categories(products: &[Product]) -> Vec<CategorySummary> {
    top_categories_limited(products, TOP_CATEGORIES_LIMIT)
}

pub fn top_categories_limited(products: &[Product], limit: usize) -> Vec<CategorySummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for product in products {
        if let Some(category) = product.category.as_deref() {
            *counts.entry(category).or_default() += 1;
        }
    }

    let mut summaries: Vec<CategorySummary> = counts
        .into_iter()
        .map(|(name, count)| CategorySummary {
            name: name.to_string(),
            count,
        })
        .collect();

    // Stable result for equal counts.
    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    summaries.truncate(limit);
    summaries
}

/// Case-insensitive substring search over the fields the search bar covers.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products.iter().collect();
    }

    let matches = |field: Option<&str>| {
        field
            .map(|value| value.to_lowercase().contains(&query))
            .unwrap_or(false)
    };

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || matches(p.category.as_deref())
                || matches(p.brand.as_deref())
                || matches(p.product_code.as_deref())
                || matches(p.description.as_deref())
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Stock,
    Category,
}

pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Price => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::Stock => products.sort_by(|a, b| a.stock.cmp(&b.stock)),
        SortKey::Category => products.sort_by(|a, b| a.category.cmp(&b.category)),
    }
}
