//! SeaORM entity for the `products` table

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i64,
    pub product_name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            product_name: model.product_name,
            price: model.price,
            stock: model.stock,
        }
    }
}

/// Writable columns; the id is left to the database sequence.
impl From<&NewProduct> for ActiveModel {
    fn from(input: &NewProduct) -> Self {
        Self {
            product_id: NotSet,
            product_name: Set(input.product_name.clone()),
            price: Set(input.price),
            stock: Set(input.stock),
        }
    }
}
