// handlers/protected/mod.rs - Admin handlers
//
// Every route here sits behind middleware::require_admin, which redirects to
// /login when the session token is missing or invalid and otherwise inserts
// an AdminSession extension.

pub mod admin;
pub mod session;

pub use admin::{add_product, admin_list, change_prices, delete_product};
pub use session::logout;
