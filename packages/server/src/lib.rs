pub mod config;
pub mod error;
pub mod handlers;
pub mod images;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Realty Listings API",
        version = "1.0.0",
        description = "REST API for real-estate property listings"
    ),
    paths(
        handlers::health::health,
        handlers::property::list_properties,
        handlers::property::get_property,
        handlers::property::create_property,
        handlers::property::update_property,
        handlers::property::delete_property,
    ),
    components(schemas(
        common::property::Property,
        crate::error::ErrorBody,
        crate::models::property::DeleteResponse,
    )),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Properties", description = "Property listing CRUD operations"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = routes::cors_layer(&state.config.server.cors);

    axum::Router::new()
        .merge(routes::routes())
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
