use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewProduct, Product, ProductField};

const SELECT_PRODUCT: &str =
    "SELECT id, product_name, price, currency, photo_path, category, description FROM product";

/// Persistence contract for the catalog. Operations on a missing id report
/// `None`/`false` instead of failing; callers decide whether that is an error.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, DatabaseError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, DatabaseError>;

    /// Returns the id assigned to the new row
    async fn insert(&self, product: NewProduct) -> Result<i64, DatabaseError>;

    /// Returns false when no product has this id
    async fn update_field(&self, id: i64, field: ProductField) -> Result<bool, DatabaseError>;

    /// Returns false when no product has this id
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, DatabaseError> {
        let sql = format!("{SELECT_PRODUCT} ORDER BY id ASC");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, DatabaseError> {
        let sql = format!("{SELECT_PRODUCT} WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO product (product_name, price, currency, photo_path, category, description)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.product_name)
        .bind(product.price)
        .bind(&product.currency)
        .bind(&product.photo_path)
        .bind(&product.category)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted product {} ({})", id, product.product_name);
        Ok(id)
    }

    async fn update_field(&self, id: i64, field: ProductField) -> Result<bool, DatabaseError> {
        let result = match field {
            ProductField::Price(price) => {
                sqlx::query("UPDATE product SET price = ? WHERE id = ?")
                    .bind(price)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
