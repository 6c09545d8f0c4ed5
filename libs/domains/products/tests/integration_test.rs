//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Queries generated for search and sort behave as expected
//! - Column constraints match the application rules
//! - Affected-row counts drive not-found handling

use domain_products::*;
use test_utils::{SampleProduct, TestDatabase, assert_price_eq};

fn new_product(name: &str, price: f64, stock: i32) -> NewProduct {
    NewProduct {
        product_name: name.to_string(),
        price,
        stock,
    }
}

fn filter(search: Option<&str>, sort: Option<&str>) -> ProductFilter {
    ProductFilter {
        search: search.map(str::to_string),
        sort: sort.map(str::to_string),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_insert_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let sample = SampleProduct::for_test("insert_and_get");

    let input = new_product(&sample.product_name, sample.price, sample.stock);
    let id = repo.insert(&input).await.unwrap();

    let stored = repo.get_by_id(id).await.unwrap().expect("product should exist");
    assert_eq!(stored.product_id, id);
    assert_eq!(stored.product_name, input.product_name);
    assert_price_eq(stored.price, input.price);
    assert_eq!(stored.stock, input.stock);
}

#[tokio::test]
async fn test_get_missing_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    assert_eq!(repo.get_by_id(999_999).await.unwrap(), None);
}

#[tokio::test]
async fn test_default_order_is_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let first = db.insert_product("Alpha", 5.0, 1).await;
    let second = db.insert_product("Beta", 3.0, 2).await;
    let third = db.insert_product("Gamma", 4.0, 3).await;

    let ids: Vec<i64> = repo
        .list(&ProductFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product_id)
        .collect();

    assert_eq!(ids, vec![third, second, first]);
}

#[tokio::test]
async fn test_sort_by_price_and_stock() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    db.insert_product("Mid", 20.0, 5).await;
    db.insert_product("Cheap", 2.5, 9).await;
    db.insert_product("Pricey", 99.0, 0).await;

    let names = |products: Vec<Product>| -> Vec<String> {
        products.into_iter().map(|p| p.product_name).collect()
    };

    let by_price_asc = repo.list(&filter(None, Some("price_asc"))).await.unwrap();
    assert_eq!(names(by_price_asc), ["Cheap", "Mid", "Pricey"]);

    let by_price_desc = repo.list(&filter(None, Some("price_desc"))).await.unwrap();
    assert_eq!(names(by_price_desc), ["Pricey", "Mid", "Cheap"]);

    let by_stock_asc = repo.list(&filter(None, Some("stock_asc"))).await.unwrap();
    assert_eq!(names(by_stock_asc), ["Pricey", "Mid", "Cheap"]);

    let by_stock_desc = repo.list(&filter(None, Some("stock_desc"))).await.unwrap();
    assert_eq!(names(by_stock_desc), ["Cheap", "Mid", "Pricey"]);
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_newest() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let older = db.insert_product("Older", 1.0, 1).await;
    let newer = db.insert_product("Newer", 2.0, 1).await;

    let products = repo.list(&filter(None, Some("name; DROP TABLE products"))).await.unwrap();

    assert_eq!(products[0].product_id, newer);
    assert_eq!(products[1].product_id, older);
}

#[tokio::test]
async fn test_search_matches_substring() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    db.insert_product("Desk Lamp", 19.99, 4).await;
    db.insert_product("Floor Lamp", 49.0, 2).await;
    db.insert_product("Bookshelf", 89.0, 1).await;

    let lamps = repo.list(&filter(Some("Lamp"), None)).await.unwrap();
    assert_eq!(lamps.len(), 2);
    assert!(lamps.iter().all(|p| p.product_name.contains("Lamp")));

    let everything = repo.list(&filter(Some(""), None)).await.unwrap();
    assert_eq!(everything.len(), 3);

    let nothing = repo.list(&filter(Some("Sofa"), None)).await.unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let id = db.insert_product("Desk Lamp", 19.99, 4).await;

    let rows = repo
        .update(id, &new_product("Desk Lamp Pro", 24.5, 0))
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let stored = repo.get_by_id(id).await.unwrap().expect("updated product");
    assert_eq!(stored.product_name, "Desk Lamp Pro");
    assert_price_eq(stored.price, 24.5);
    assert_eq!(stored.stock, 0);
}

#[tokio::test]
async fn test_update_and_delete_missing_rows() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    assert_eq!(repo.update(404, &new_product("Ghost", 1.0, 1)).await.unwrap(), 0);
    assert_eq!(repo.delete(404).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_removes_row() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let id = db.insert_product("Desk Lamp", 19.99, 4).await;

    assert_eq!(repo.delete(id).await.unwrap(), 1);
    assert_eq!(repo.get_by_id(id).await.unwrap(), None);
}

#[tokio::test]
async fn test_schema_rejects_invalid_rows() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    assert!(repo.insert(&new_product("Free", 0.0, 1)).await.is_err());
    assert!(repo.insert(&new_product("Owed", 1.0, -1)).await.is_err());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_create_update_delete_cycle() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let created = service
        .create_product(new_product("Desk Lamp", 19.99, 4))
        .await
        .unwrap();
    assert!(created.product_id > 0);

    let updated = service
        .update_product(created.product_id, new_product("Desk Lamp", 17.5, 10))
        .await
        .unwrap();
    assert_eq!(updated.stock, 10);

    service.delete_product(created.product_id).await.unwrap();

    assert!(matches!(
        service.get_product(created.product_id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_product(created.product_id).await,
        Err(ProductError::NotFound(_))
    ));
}
