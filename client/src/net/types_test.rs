use super::*;

#[test]
fn product_parses_backend_json() {
    let raw = r#"{
        "id": "1",
        "name": "Premium Coffee Beans",
        "sku": "COF001",
        "price": 24.99,
        "cost": 15.5,
        "quantity": 5,
        "minStockLevel": 20,
        "categoryId": "1",
        "createdAt": "",
        "updatedAt": ""
    }"#;
    let product: Product = serde_json::from_str(raw).unwrap();
    assert_eq!(product.sku, "COF001");
    assert_eq!(product.min_stock_level, 20);
    assert_eq!(product.description, "");
    assert!(product.category.is_none());
}

#[test]
fn sale_parses_with_nested_product_absent() {
    let raw = r#"{"id":"s1","productId":"1","quantity":2,"price":24.99,"total":49.98,"saleDate":"2024-05-01T10:00:00Z"}"#;
    let sale: Sale = serde_json::from_str(raw).unwrap();
    assert_eq!(sale.product_id, "1");
    assert!((sale.total - 49.98).abs() < f64::EPSILON);
}

#[test]
fn category_serializes_camel_case_and_skips_missing_count() {
    let category = Category {
        id: "c1".to_owned(),
        name: "Beverages".to_owned(),
        description: String::new(),
        product_count: None,
    };
    assert_eq!(
        serde_json::to_value(&category).unwrap(),
        serde_json::json!({ "id": "c1", "name": "Beverages", "description": "" })
    );
}

#[test]
fn registration_serializes_confirm_password_camel_case() {
    let registration = Registration {
        name: "Ann".to_owned(),
        email: "ann@example.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "pw".to_owned(),
    };
    let value = serde_json::to_value(&registration).unwrap();
    assert_eq!(value["confirmPassword"], "pw");
}

#[test]
fn dashboard_stats_default_is_zeroed() {
    let stats = DashboardStats::default();
    assert_eq!(stats.total_products, 0);
    assert_eq!(stats.low_stock_products, 0);
}
