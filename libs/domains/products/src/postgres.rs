use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select,
};

use crate::{
    entity,
    models::{NewProduct, Product, ProductFilter, SortOrder},
    repository::ProductRepository,
};

/// PostgreSQL-backed product repository.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_sort(query: Select<entity::Entity>, order: SortOrder) -> Select<entity::Entity> {
    match order {
        SortOrder::PriceAsc => query.order_by_asc(entity::Column::Price),
        SortOrder::PriceDesc => query.order_by_desc(entity::Column::Price),
        SortOrder::StockAsc => query.order_by_asc(entity::Column::Stock),
        SortOrder::StockDesc => query.order_by_desc(entity::Column::Stock),
        SortOrder::Newest => query.order_by_desc(entity::Column::ProductId),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DbErr> {
        let mut query = entity::Entity::find();

        // Wildcards in the term are passed through to LIKE
        if let Some(term) = filter.search_term() {
            query = query.filter(entity::Column::ProductName.like(format!("%{}%", term)));
        }

        let models = apply_sort(query, filter.sort_order()).all(&self.db).await?;

        tracing::debug!(count = models.len(), "Listed products");
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, DbErr> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn insert(&self, input: &NewProduct) -> Result<i64, DbErr> {
        let active_model = entity::ActiveModel::from(input);
        let result = entity::Entity::insert(active_model).exec(&self.db).await?;

        tracing::info!(product_id = result.last_insert_id, "Created product");
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i64, input: &NewProduct) -> Result<u64, DbErr> {
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel::from(input))
            .filter(entity::Column::ProductId.eq(id))
            .exec(&self.db)
            .await?;

        tracing::info!(product_id = id, rows = result.rows_affected, "Updated product");
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(product_id = id, rows = result.rows_affected, "Deleted product");
        Ok(result.rows_affected)
    }
}
