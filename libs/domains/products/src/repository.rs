use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::{NewProduct, Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Methods report raw storage errors; the service decides which operation
/// a failure belongs to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products matching the filter, in the filter's sort order
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DbErr>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, DbErr>;

    /// Insert a product and return the generated ID
    async fn insert(&self, input: &NewProduct) -> Result<i64, DbErr>;

    /// Overwrite every field of a product, returning the number of rows changed
    async fn update(&self, id: i64, input: &NewProduct) -> Result<u64, DbErr>;

    /// Delete a product by ID, returning the number of rows removed
    async fn delete(&self, id: i64) -> Result<u64, DbErr>;
}
