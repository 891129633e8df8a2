use std::time::Duration;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsConfig;
use crate::handlers::{health, property};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::health))
        .merge(property_routes())
}

fn property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/properties",
            get(property::list_properties).post(property::create_property),
        )
        .route(
            "/properties/{id}",
            get(property::get_property)
                .put(property::update_property)
                .delete(property::delete_property),
        )
        .layer(property::property_body_limit())
}

/// CORS layer from configuration. An empty origin list permits any origin,
/// for local development.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
