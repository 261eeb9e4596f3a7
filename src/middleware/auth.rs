use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{AuthError, SESSION_COOKIE};
use crate::state::AppState;

/// Admin identity established by a valid session token
#[derive(Clone, Debug)]
pub struct AdminSession {
    pub username: String,
}

/// Guard for admin routes: a valid session token or a redirect to /login.
/// The wrapped handler only runs when the token checks out.
pub async fn require_admin(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let claims = extract_session_token(request.headers()).and_then(|token| state.sessions.validate(&token));

    match claims {
        Ok(claims) => {
            request.extensions_mut().insert(AdminSession {
                username: claims.sub,
            });
            next.run(request).await
        }
        Err(AuthError::MissingSession) => {
            tracing::debug!("No admin session for {}, redirecting to login", request.uri().path());
            Redirect::to("/login").into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected admin session for {}: {}", request.uri().path(), e);
            Redirect::to("/login").into_response()
        }
    }
}

/// Session token from the session cookie, or a Bearer token for API clients
pub fn extract_session_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    if let Some(token) = from_cookie.filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::MissingSession);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidSession("Invalid Authorization header format".to_string()))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(AuthError::InvalidSession("Empty session token".to_string())),
        None => Err(AuthError::InvalidSession(
            "Authorization header must use Bearer token format".to_string(),
        )),
    }
}

/// Set-Cookie value that starts a session
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that ends a session
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
