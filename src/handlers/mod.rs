// handlers/mod.rs - two access tiers
//
// Public (no session) → Protected (admin session checked by middleware::require_admin)
pub mod public; // Catalog listings, login, health
pub mod protected; // Admin panel: prices, add, delete, logout
