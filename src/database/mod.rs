pub mod manager;
pub mod models;
pub mod product_store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewProduct, Product, ProductError, ProductField};
pub use product_store::{ProductStore, SqliteProductStore};
