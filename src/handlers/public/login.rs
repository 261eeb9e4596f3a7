use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::AuthError;
use crate::error::PageError;
use crate::middleware::session_cookie;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_form() -> Html<String> {
    views::login_page(None)
}

/// POST /login - check credentials and start a session
///
/// Success sets the session cookie and redirects to /admin. Failure re-renders
/// the form with one generic message, whichever field was wrong.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    if !state.credentials.verify(&form.username, &form.password) {
        tracing::warn!("Rejected admin login attempt");
        let message = AuthError::InvalidCredentials.to_string();
        return Ok((StatusCode::UNAUTHORIZED, views::login_page(Some(&message))).into_response());
    }

    let token = state.sessions.issue(&form.username)?;
    let cookie = session_cookie(&token, state.sessions.max_age_secs(), state.cookie_secure);

    tracing::info!(username = %form.username, "Admin logged in");
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response())
}
