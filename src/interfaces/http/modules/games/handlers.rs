//! Game REST API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;
use uuid::Uuid;

use super::dto::{parse_price, GameRequest, GameResponse, ListGamesParams, MAX_PRICE};
use crate::application::GameService;
use crate::domain::GameError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson, ValidatedPath, ValidatedQuery};

pub const ALREADY_EXISTS_MESSAGE: &str = "a game with this name already exists for this publisher";
pub const NOT_FOUND_MESSAGE: &str = "this game does not exist";

type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// State shared by the game handlers
#[derive(Clone)]
pub struct GameHandlerState {
    pub service: Arc<GameService>,
}

/// Map a service failure to its HTTP answer. `NotFound` maps to 404 here;
/// `get_game` answers absence itself.
fn error_response(e: GameError) -> ApiError {
    match e {
        GameError::AlreadyExists { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(ALREADY_EXISTS_MESSAGE)),
        ),
        GameError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(NOT_FOUND_MESSAGE)),
        ),
        GameError::Storage(e) => {
            error!(error = %e, "Game repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/games",
    tag = "Games",
    params(ListGamesParams),
    responses(
        (status = 200, description = "One page of games", body = ApiResponse<Vec<GameResponse>>),
        (status = 204, description = "The page is empty"),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_games(
    State(state): State<GameHandlerState>,
    ValidatedQuery(params): ValidatedQuery<ListGamesParams>,
) -> Result<Response, ApiError> {
    let games = state
        .service
        .list(params.into())
        .await
        .map_err(error_response)?;

    if games.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let responses: Vec<GameResponse> = games.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/games/{id}",
    tag = "Games",
    params(("id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game details", body = ApiResponse<GameResponse>),
        (status = 204, description = "No game has this ID"),
        (status = 400, description = "Malformed ID")
    )
)]
pub async fn get_game(
    State(state): State<GameHandlerState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Response, ApiError> {
    match state.service.get_by_id(id).await {
        Ok(game) => Ok(Json(ApiResponse::success(GameResponse::from(game))).into_response()),
        Err(GameError::NotFound(_)) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/games",
    tag = "Games",
    request_body = GameRequest,
    responses(
        (status = 200, description = "Created", body = ApiResponse<GameResponse>),
        (status = 400, description = "Invalid data"),
        (status = 422, description = "Name already taken for this publisher")
    )
)]
pub async fn create_game(
    State(state): State<GameHandlerState>,
    ValidatedJson(req): ValidatedJson<GameRequest>,
) -> Result<Json<ApiResponse<GameResponse>>, ApiError> {
    let game = state
        .service
        .insert(req.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(game.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/games/{id}",
    tag = "Games",
    params(("id" = Uuid, Path, description = "Game ID")),
    request_body = GameRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Not found"),
        (status = 422, description = "Name already taken for this publisher")
    )
)]
pub async fn update_game(
    State(state): State<GameHandlerState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(req): ValidatedJson<GameRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    patch,
    path = "/api/v1/games/{id}/price/{price}",
    tag = "Games",
    params(
        ("id" = Uuid, Path, description = "Game ID"),
        ("price" = String, Path, description = "New price: a decimal in 0..=1000000000 with at most two places")
    ),
    responses(
        (status = 200, description = "Price updated"),
        (status = 400, description = "Malformed ID or price"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_game_price(
    State(state): State<GameHandlerState>,
    ValidatedPath((id, raw_price)): ValidatedPath<(Uuid, String)>,
) -> Result<StatusCode, ApiError> {
    let Some(price) = parse_price(&raw_price) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "price: {:?} is not a decimal between 0 and {} with at most two places",
                raw_price, MAX_PRICE
            ))),
        ));
    };

    state
        .service
        .update_price(id, price)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/v1/games/{id}",
    tag = "Games",
    params(("id" = Uuid, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_game(
    State(state): State<GameHandlerState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.remove(id).await.map_err(error_response)?;
    Ok(StatusCode::OK)
}

// ── Tests ──────────────────────────────────────────────────────
