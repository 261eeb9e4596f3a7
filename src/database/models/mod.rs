pub mod product;

pub use product::{NewProduct, Product, ProductError, ProductField, DEFAULT_CURRENCY};
