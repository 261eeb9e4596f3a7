use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Currency stored when the admin leaves the field blank (Kyrgyzstani som)
pub const DEFAULT_CURRENCY: &str = "KGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub currency: String,
    pub photo_path: Option<String>,
    pub category: String,
    pub description: Option<String>,
}

/// Insert payload; the id is assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub price: f64,
    pub currency: String,
    pub photo_path: Option<String>,
    pub category: String,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn new(product_name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            photo_path: None,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_photo_path(mut self, photo_path: impl Into<String>) -> Self {
        self.photo_path = Some(photo_path.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// A mutable column together with its new value. Price is the only field
/// that changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductField {
    Price(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error("'{0}' is not a valid price")]
    InvalidPrice(String),

    #[error("'{0}' is not a valid currency code")]
    InvalidCurrency(String),

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Parse a submitted price: finite and non-negative
pub fn parse_price(raw: &str) -> Result<f64, ProductError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ProductError::InvalidPrice(trimmed.to_string())),
    }
}

/// Blank means the default currency; otherwise exactly three ASCII letters, upper-cased
pub fn normalize_currency(raw: Option<&str>) -> Result<String, ProductError> {
    let code = raw.map(str::trim).unwrap_or_default();
    if code.is_empty() {
        return Ok(DEFAULT_CURRENCY.to_string());
    }
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ProductError::InvalidCurrency(code.to_string()))
    }
}

/// Trimmed value of a required text field
pub fn required_text(raw: Option<&str>, field: &'static str) -> Result<String, ProductError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ProductError::MissingField(field)),
    }
}

/// Trimmed value of an optional text field, blank collapsing to None
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
