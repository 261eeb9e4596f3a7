// handlers/public/mod.rs - Public handlers (no session required)
//
// Route Prefix: none (/, /view_products, /login, /health)
// Middleware: none

pub mod health;
pub mod login;
pub mod products;

pub use health::health;
pub use login::{login_form, login_submit};
pub use products::{index, view_products};
