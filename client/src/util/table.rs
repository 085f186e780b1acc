//! Pure list math behind the inventory tables and dashboard cards.
//!
//! Search filtering, page slicing and the sum aggregations are kept here so
//! they can be unit-tested without a browser.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use crate::net::types::{DashboardStats, Product, Sale};

/// Rows shown per table page.
pub const ROWS_PER_PAGE: usize = 10;

/// Stock level bucket for a product row badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low,
    Medium,
    InStock,
}

impl StockStatus {
    /// Bucket `quantity` against the product's minimum level.
    pub fn of(quantity: u32, min_stock_level: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity < min_stock_level {
            Self::Low
        } else if quantity < min_stock_level.saturating_mul(2) {
            Self::Medium
        } else {
            Self::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::Low => "Low Stock",
            Self::Medium => "Medium Stock",
            Self::InStock => "In Stock",
        }
    }

    /// CSS modifier for the badge.
    pub fn class(self) -> &'static str {
        match self {
            Self::OutOfStock => "badge badge--error",
            Self::Low => "badge badge--warning",
            Self::Medium => "badge badge--info",
            Self::InStock => "badge badge--success",
        }
    }

    /// Whether the product belongs on the low-stock alert list.
    pub fn needs_restock(self) -> bool {
        matches!(self, Self::OutOfStock | Self::Low)
    }
}

/// Case-insensitive match of `query` against product name or SKU.
/// An empty query matches everything.
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || product.name.to_lowercase().contains(&query) || product.sku.to_lowercase().contains(&query)
}

/// Products matching `query`, in their original order.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| matches_query(p, query)).collect()
}

/// Number of pages needed for `len` rows; at least one.
pub fn page_count(len: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    len.div_ceil(rows_per_page).max(1)
}

/// The zero-based `page` of `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, rows_per_page: usize) -> &[T] {
    let start = page.saturating_mul(rows_per_page).min(items.len());
    let end = start.saturating_add(rows_per_page).min(items.len());
    &items[start..end]
}

/// Products at or below the restock threshold.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| StockStatus::of(p.quantity, p.min_stock_level).needs_restock())
        .collect()
}

/// Sum of sale totals.
pub fn revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(|s| s.total).sum()
}

/// Aggregate the dashboard cards from raw lists.
pub fn dashboard_stats(products: &[Product], sales: &[Sale]) -> DashboardStats {
    DashboardStats {
        total_products: products.len(),
        total_sales: sales.len(),
        total_revenue: revenue(sales),
        low_stock_products: low_stock(products).len(),
    }
}

/// Format a dollar amount with thousands separators and two decimals.
pub fn format_currency(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
