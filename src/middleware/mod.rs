pub mod auth;

pub use auth::{clear_session_cookie, extract_session_token, require_admin, session_cookie, AdminSession};
