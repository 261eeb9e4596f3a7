use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::graphql::{graphql_get, graphql_post, GRAPHQL_PATH};
use crate::handlers::{protected, public};
use crate::middleware::require_admin;
use crate::state::AppState;
use crate::uploads::PUBLIC_PREFIX;

/// The full HTTP surface: public pages, the guarded admin panel, GraphQL and
/// the uploaded photos.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        // Public
        .merge(public_routes())
        .merge(graphql_routes())
        // Admin (session required)
        .merge(admin_routes(state.clone()))
        // Uploaded photos
        .nest_service(&format!("/{}", PUBLIC_PREFIX), uploads)
        // Global middleware
        .layer(DefaultBodyLimit::max(config.uploads.max_request_size_bytes))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::index))
        .route("/health", get(public::health))
        .route("/view_products", get(public::view_products))
        .route("/login", get(public::login_form).post(public::login_submit))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(protected::admin_list))
        .route("/logout", get(protected::logout))
        .route("/change_prices", post(protected::change_prices))
        .route("/add_product", post(protected::add_product))
        .route("/delete_product/:id", post(protected::delete_product))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

fn graphql_routes() -> Router<AppState> {
    Router::new().route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}
