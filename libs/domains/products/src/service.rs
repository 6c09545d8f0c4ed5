//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{Operation, ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductFilter};
use crate::repository::ProductRepository;

/// Product service providing the catalog operations
///
/// Inputs arrive already validated; the service orchestrates repository
/// calls and turns "no row" outcomes into [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products, optionally filtered by name and sorted
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository
            .list(filter)
            .await
            .map_err(Operation::List.failed())
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(Operation::Get.failed())?
            .ok_or(ProductError::NotFound(id))
    }

    /// Insert a product and return it as stored
    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        let id = self
            .repository
            .insert(&input)
            .await
            .map_err(Operation::Create.failed())?;

        self.repository
            .get_by_id(id)
            .await
            .map_err(Operation::Create.failed())?
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace every field of a product and return it as stored
    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn update_product(&self, id: i64, input: NewProduct) -> ProductResult<Product> {
        let rows = self
            .repository
            .update(id, &input)
            .await
            .map_err(Operation::Update.failed())?;

        if rows == 0 {
            return Err(ProductError::NotFound(id));
        }

        self.repository
            .get_by_id(id)
            .await
            .map_err(Operation::Update.failed())?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let rows = self
            .repository
            .delete(id)
            .await
            .map_err(Operation::Delete.failed())?;

        if rows == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}
