pub mod catalog_service;

pub use catalog_service::{
    apply_price_changes, create_product, delete_product, find_product, price_field_name, PhotoUpload,
    ProductSubmission,
};
