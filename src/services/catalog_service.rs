use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::database::models::product::{normalize_currency, optional_text, parse_price, required_text};
use crate::database::models::{NewProduct, Product, ProductField};
use crate::database::ProductStore;
use crate::error::ApiError;
use crate::uploads::UploadHandler;

/// Name of the bulk-update form field carrying the new price of `id`
pub fn price_field_name(id: i64) -> String {
    format!("price_{}", id)
}

/// A photo as received from the client
#[derive(Debug, Clone, Default)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw add-product submission; nothing has been validated yet
#[derive(Debug, Clone, Default)]
pub struct ProductSubmission {
    pub product_name: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Apply the `price_<id>` fields of a bulk price form.
///
/// Every non-empty field is validated before the first write, so a single bad
/// value leaves every price untouched. Returns the number of products updated.
pub async fn apply_price_changes(
    store: &dyn ProductStore,
    form: &HashMap<String, String>,
) -> Result<usize, ApiError> {
    let mut changes = Vec::new();
    for product in store.list_all().await? {
        let field = price_field_name(product.id);
        let Some(raw) = form.get(&field).map(|v| v.trim()) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let price = parse_price(raw).map_err(|_| ApiError::invalid_price(field.clone(), raw))?;
        changes.push((product.id, price));
    }

    let mut updated = 0;
    for (id, price) in changes {
        if store.update_field(id, ProductField::Price(price)).await? {
            updated += 1;
        } else {
            debug!("Product {} disappeared before its price could be changed", id);
        }
    }

    info!("Updated prices of {} product(s)", updated);
    Ok(updated)
}

/// Validate a submission, store its photo and insert the product
pub async fn create_product(
    store: &dyn ProductStore,
    uploads: &UploadHandler,
    submission: ProductSubmission,
) -> Result<i64, ApiError> {
    let product_name = required_text(submission.product_name.as_deref(), "product_name")?;
    let category = required_text(submission.category.as_deref(), "category")?;
    let raw_price = required_text(submission.price.as_deref(), "price")?;
    let price = parse_price(&raw_price)?;
    let currency = normalize_currency(submission.currency.as_deref())?;
    let description = optional_text(submission.description.as_deref());

    // Validation happens first so a rejected form never leaves a file behind
    let photo_path = match &submission.photo {
        Some(photo) => uploads.store(&photo.file_name, &photo.bytes).await?,
        None => None,
    };

    let new_product = NewProduct {
        product_name,
        price,
        currency,
        photo_path: photo_path.clone(),
        category,
        description,
    };

    match store.insert(new_product).await {
        Ok(id) => {
            info!("Created product {}", id);
            Ok(id)
        }
        Err(e) => {
            if let Some(path) = &photo_path {
                uploads.remove(path).await;
            }
            Err(e.into())
        }
    }
}

/// Hard-delete a product and its photo; a missing id is `NotFound`
pub async fn delete_product(
    store: &dyn ProductStore,
    uploads: &UploadHandler,
    id: i64,
) -> Result<Product, ApiError> {
    let product = find_product(store, id).await?;
    if !store.delete(id).await? {
        return Err(ApiError::not_found(format!("Product {} not found", id)));
    }

    if let Some(path) = &product.photo_path {
        uploads.remove(path).await;
    }

    info!("Deleted product {} ({})", id, product.product_name);
    Ok(product)
}

/// Load a product or fail with `NotFound`
pub async fn find_product(store: &dyn ProductStore, id: i64) -> Result<Product, ApiError> {
    match store.get_by_id(id).await? {
        Some(product) => Ok(product),
        None => {
            warn!("Product {} not found", id);
            Err(ApiError::not_found(format!("Product {} not found", id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn chair() -> ProductSubmission {
        ProductSubmission {
            product_name: Some("Chair".to_string()),
            price: Some("100".to_string()),
            category: Some("Furniture".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn bulk_update_changes_only_filled_fields() {
        let store = testing::memory_store().await;
        let a = store.insert(NewProduct::new("A", 1.0, "x")).await.unwrap();
        let b = store.insert(NewProduct::new("B", 2.0, "x")).await.unwrap();
        let c = store.insert(NewProduct::new("C", 3.0, "x")).await.unwrap();

        let submitted = form(&[
            (price_field_name(a).as_str(), "9.99"),
            (price_field_name(b).as_str(), "  "),
            ("price_999", "5"),
        ]);
        let updated = apply_price_changes(&store, &submitted).await.unwrap();

        assert_eq!(updated, 1);
        assert_eq!(store.get_by_id(a).await.unwrap().unwrap().price, 9.99);
        assert_eq!(store.get_by_id(b).await.unwrap().unwrap().price, 2.0);
        assert_eq!(store.get_by_id(c).await.unwrap().unwrap().price, 3.0);
    }

    #[tokio::test]
    async fn bulk_update_with_bad_value_writes_nothing() {
        let store = testing::memory_store().await;
        let a = store.insert(NewProduct::new("A", 1.0, "x")).await.unwrap();
        let b = store.insert(NewProduct::new("B", 2.0, "x")).await.unwrap();

        let submitted = form(&[(price_field_name(a).as_str(), "3.50"), (price_field_name(b).as_str(), "cheap")]);
        let err = apply_price_changes(&store, &submitted).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidPrice { ref value, .. } if value == "cheap"));
        assert_eq!(store.get_by_id(a).await.unwrap().unwrap().price, 1.0);
        assert_eq!(store.get_by_id(b).await.unwrap().unwrap().price, 2.0);
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let store = testing::memory_store().await;
        let a = store.insert(NewProduct::new("A", 1.0, "x")).await.unwrap();

        let err = apply_price_changes(&store, &form(&[(price_field_name(a).as_str(), "-4")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidPrice { .. }));
    }

    #[tokio::test]
    async fn creates_product_without_photo() {
        let store = testing::memory_store().await;
        let uploads = UploadHandler::new(testing::temp_upload_dir());
        let existing = store.insert(NewProduct::new("Old", 1.0, "x")).await.unwrap();
        store.delete(existing).await.unwrap();

        let id = create_product(&store, &uploads, chair()).await.unwrap();
        assert_ne!(id, existing);

        let product = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.product_name, "Chair");
        assert_eq!(product.price, 100.0);
        assert_eq!(product.category, "Furniture");
        assert_eq!(product.currency, "KGS");
        assert!(product.photo_path.is_none());
        assert!(product.description.is_none());
    }

    #[tokio::test]
    async fn rejected_photo_means_no_photo_path() {
        let store = testing::memory_store().await;
        let dir = testing::temp_upload_dir();
        let uploads = UploadHandler::new(&dir);

        let submission = ProductSubmission {
            photo: Some(PhotoUpload {
                file_name: "chair.exe".to_string(),
                bytes: b"MZ".to_vec(),
            }),
            ..chair()
        };
        let id = create_product(&store, &uploads, submission).await.unwrap();

        assert!(store.get_by_id(id).await.unwrap().unwrap().photo_path.is_none());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn accepted_photo_is_linked_and_removed_with_the_product() {
        let store = testing::memory_store().await;
        let dir = testing::temp_upload_dir();
        let uploads = UploadHandler::new(&dir);

        let submission = ProductSubmission {
            photo: Some(PhotoUpload {
                file_name: "chair.PNG".to_string(),
                bytes: b"\x89PNG".to_vec(),
            }),
            ..chair()
        };
        let id = create_product(&store, &uploads, submission).await.unwrap();
        let photo_path = store.get_by_id(id).await.unwrap().unwrap().photo_path.unwrap();
        let on_disk = uploads.resolve(&photo_path).unwrap();
        assert!(on_disk.exists());

        delete_product(&store, &uploads, id).await.unwrap();
        assert!(!on_disk.exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn invalid_submissions_are_rejected_before_storing() {
        let store = testing::memory_store().await;
        let uploads = UploadHandler::new(testing::temp_upload_dir());

        let missing_name = ProductSubmission { product_name: None, ..chair() };
        assert!(matches!(
            create_product(&store, &uploads, missing_name).await,
            Err(ApiError::ValidationError { .. })
        ));

        let bad_price = ProductSubmission { price: Some("ten".to_string()), ..chair() };
        assert!(matches!(
            create_product(&store, &uploads, bad_price).await,
            Err(ApiError::InvalidPrice { .. })
        ));

        let bad_currency = ProductSubmission { currency: Some("dollars".to_string()), ..chair() };
        assert!(matches!(
            create_product(&store, &uploads, bad_currency).await,
            Err(ApiError::ValidationError { .. })
        ));

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_product_is_not_found() {
        let store = testing::memory_store().await;
        let uploads = UploadHandler::new(testing::temp_upload_dir());

        assert!(matches!(
            delete_product(&store, &uploads, 12).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(find_product(&store, 12).await, Err(ApiError::NotFound(_))));
    }
}
