//! REST API layer: route handlers, DTOs, OpenAPI, and router composition.
//!
//! Place endpoints live at `/place`, system endpoints at `/health`, and
//! the place-added subscription stream at `/ws`.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the full application: REST routes, the WebSocket stream, and
/// the HTTP middleware stack, bound to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
