//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, routing::patch, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::GameService;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::games::{self, GameHandlerState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Games
        games::list_games,
        games::get_game,
        games::create_game,
        games::update_game,
        games::update_game_price,
        games::delete_game,
    ),
    components(
        schemas(
            ApiResponse<String>,
            games::GameResponse,
            games::GameRequest,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Games", description = "Video game catalog: paginated listing, insert, update, price change, removal"),
    ),
    info(
        title = "Game Catalog API",
        version = "1.0.0",
        description = "REST API for managing a catalog of video games",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(service: Arc<GameService>, health_state: HealthState) -> Router {
    let game_state = GameHandlerState { service };

    let game_routes = Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route(
            "/{id}",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        .route("/{id}/price/{price}", patch(games::update_game_price))
        .with_state(game_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Games
        .nest("/api/v1/games", game_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
