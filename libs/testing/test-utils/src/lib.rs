//! Test fixtures for the product catalog.
//!
//! - [`TestDatabase`]: Postgres container with the catalog schema (feature `postgres`)
//! - [`SampleProduct`]: valid product fields derived from a test name
//! - [`assert_price_eq`]: cent-level price comparison
//!
//! ```rust,no_run
//! use test_utils::{SampleProduct, TestDatabase};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let sample = SampleProduct::for_test("test_create_product");
//! let id = db.insert_product(&sample.product_name, sample.price, sample.stock).await;
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

use std::hash::{DefaultHasher, Hash, Hasher};

/// Field values that pass the catalog's body rules.
///
/// Derived from the test name so every test gets distinct but repeatable
/// data.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleProduct {
    pub product_name: String,
    pub price: f64,
    pub stock: i32,
}

impl SampleProduct {
    pub fn for_test(test_name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        test_name.hash(&mut hasher);
        let seed = hasher.finish();

        Self {
            product_name: format!("Sample {:08x}", seed as u32),
            // 0.01 ..= 1000.00 in whole cents
            price: ((seed % 100_000) + 1) as f64 / 100.0,
            stock: (seed % 1_000) as i32,
        }
    }
}

/// Assert that two prices agree to the cent.
#[track_caller]
pub fn assert_price_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected price {expected}, got {actual}"
    );
}
