use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use std::collections::HashMap;

use crate::error::{ApiError, PageError};
use crate::middleware::AdminSession;
use crate::services::catalog_service::{self, PhotoUpload, ProductSubmission};
use crate::state::AppState;
use crate::views;

const ADMIN_PATH: &str = "/admin";

/// GET /admin
pub async fn admin_list(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let products = state.store.list_all().await?;
    Ok(views::admin_page(&products, None))
}

/// POST /change_prices - urlencoded `price_<id>` fields
#[tracing::instrument(skip_all, fields(admin = %session.username))]
pub async fn change_prices(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, PageError> {
    match catalog_service::apply_price_changes(state.store.as_ref(), &form).await {
        Ok(_) => Ok(Redirect::to(ADMIN_PATH).into_response()),
        Err(err) => admin_page_with_error(&state, err).await,
    }
}

/// POST /add_product - multipart form with an optional `photo` file
#[tracing::instrument(skip_all, fields(admin = %session.username))]
pub async fn add_product(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(err) => return admin_page_with_error(&state, err).await,
    };

    match catalog_service::create_product(state.store.as_ref(), &state.uploads, submission).await {
        Ok(_) => Ok(Redirect::to(ADMIN_PATH).into_response()),
        Err(err) => admin_page_with_error(&state, err).await,
    }
}

/// POST /delete_product/:id
#[tracing::instrument(skip_all, fields(admin = %session.username, product_id = id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    match catalog_service::delete_product(state.store.as_ref(), &state.uploads, id).await {
        Ok(_) => Ok(Redirect::to(ADMIN_PATH).into_response()),
        Err(err) => admin_page_with_error(&state, err).await,
    }
}

async fn read_submission(mut multipart: Multipart) -> Result<ProductSubmission, ApiError> {
    let mut submission = ProductSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                submission.photo = Some(PhotoUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "product_name" => submission.product_name = Some(field.text().await?),
            "price" => submission.price = Some(field.text().await?),
            "currency" => submission.currency = Some(field.text().await?),
            "category" => submission.category = Some(field.text().await?),
            "description" => submission.description = Some(field.text().await?),
            other => tracing::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(submission)
}

/// Client errors re-render the admin panel with the message; server errors
/// fall through to the generic error page.
async fn admin_page_with_error(state: &AppState, err: ApiError) -> Result<Response, PageError> {
    let status = err.status_code();
    if status.is_server_error() {
        return Err(PageError(err));
    }

    tracing::warn!("Admin action rejected: {}", err);
    let products = state.store.list_all().await?;
    Ok((status, views::admin_page(&products, Some(&err.message()))).into_response())
}
