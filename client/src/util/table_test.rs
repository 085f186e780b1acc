use super::*;

// =============================================================
// Helpers
// =============================================================

fn product(id: &str, name: &str, sku: &str, quantity: u32, min: u32) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        sku: sku.to_owned(),
        description: String::new(),
        price: 10.0,
        cost: 5.0,
        quantity,
        min_stock_level: min,
        category_id: "c1".to_owned(),
        category: None,
    }
}

fn sale(total: f64) -> Sale {
    Sale {
        id: "s".to_owned(),
        product_id: "1".to_owned(),
        product: None,
        quantity: 1,
        price: total,
        total,
        sale_date: "2024-05-01T00:00:00Z".to_owned(),
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("1", "Premium Coffee Beans", "COF001", 5, 20),
        product("2", "Green Tea Bags", "TEA001", 8, 30),
        product("3", "Croissant", "BAK001", 100, 25),
    ]
}

// =============================================================
// StockStatus
// =============================================================

#[test]
fn stock_status_buckets() {
    assert_eq!(StockStatus::of(0, 10), StockStatus::OutOfStock);
    assert_eq!(StockStatus::of(9, 10), StockStatus::Low);
    assert_eq!(StockStatus::of(10, 10), StockStatus::Medium);
    assert_eq!(StockStatus::of(19, 10), StockStatus::Medium);
    assert_eq!(StockStatus::of(20, 10), StockStatus::InStock);
}

#[test]
fn stock_status_zero_minimum_is_in_stock_when_positive() {
    assert_eq!(StockStatus::of(1, 0), StockStatus::InStock);
}

#[test]
fn only_out_and_low_need_restock() {
    assert!(StockStatus::OutOfStock.needs_restock());
    assert!(StockStatus::Low.needs_restock());
    assert!(!StockStatus::Medium.needs_restock());
    assert!(!StockStatus::InStock.needs_restock());
}

// =============================================================
// Filtering
// =============================================================

#[test]
fn empty_query_matches_all() {
    assert_eq!(filter_products(&catalog(), "  ").len(), 3);
}

#[test]
fn query_matches_name_case_insensitively() {
    let items = catalog();
    let hits = filter_products(&items, "coffee");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
}

#[test]
fn query_matches_sku() {
    let items = catalog();
    let hits = filter_products(&items, "tea0");
    assert_eq!(hits.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["2"]);
}

#[test]
fn query_without_hits_is_empty() {
    assert!(filter_products(&catalog(), "sandwich").is_empty());
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn page_count_rounds_up_and_is_at_least_one() {
    assert_eq!(page_count(0, 10), 1);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(page_count(5, 0), 1);
}

#[test]
fn paginate_slices_pages() {
    let items: Vec<u32> = (0..25).collect();
    assert_eq!(paginate(&items, 0, 10), &items[0..10]);
    assert_eq!(paginate(&items, 2, 10), &items[20..25]);
}

#[test]
fn paginate_out_of_range_is_empty() {
    let items: Vec<u32> = (0..5).collect();
    assert!(paginate(&items, 3, 10).is_empty());
    assert!(paginate(&items, usize::MAX, usize::MAX).is_empty());
}

// =============================================================
// Aggregation
// =============================================================

#[test]
fn low_stock_lists_products_below_minimum() {
    let items = catalog();
    let ids: Vec<&str> = low_stock(&items).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn dashboard_stats_sums_revenue_and_counts() {
    let stats = dashboard_stats(&catalog(), &[sale(49.98), sale(24.95), sale(8.97)]);
    assert_eq!(stats.total_products, 3);
    assert_eq!(stats.total_sales, 3);
    assert_eq!(stats.low_stock_products, 2);
    assert!((stats.total_revenue - 83.90).abs() < 1e-9);
}

#[test]
fn dashboard_stats_of_empty_lists() {
    assert_eq!(dashboard_stats(&[], &[]), DashboardStats::default());
}

// =============================================================
// format_currency
// =============================================================

#[test]
fn format_currency_groups_thousands() {
    assert_eq!(format_currency(45_280.0), "$45,280.00");
    assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
}

#[test]
fn format_currency_small_and_negative_amounts() {
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(6.99), "$6.99");
    assert_eq!(format_currency(-12.5), "-$12.50");
}
