use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use crate::middleware::{clear_session_cookie, AdminSession};
use crate::state::AppState;

/// GET /logout - drop the session cookie unconditionally
pub async fn logout(State(state): State<AppState>, Extension(session): Extension<AdminSession>) -> Response {
    tracing::info!(username = %session.username, "Admin logged out");
    (
        [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Redirect::to("/login"),
    )
        .into_response()
}
