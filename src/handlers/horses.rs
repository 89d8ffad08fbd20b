//! Horse CRUD handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ValidJson, ValidQuery};
use crate::model::{Horse, HorsePatch, ListParams, NewHorse};
use crate::response::HorseListResponse;
use crate::service::{HorseService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::validation("id", "must be a valid UUID"))
}

#[utoipa::path(
    get,
    path = "/api/v1/horses/",
    tag = "horses",
    params(ListParams),
    responses(
        (status = 200, description = "Page of horses with total count", body = HorseListResponse),
        (status = 400, description = "Unknown sort field", body = ErrorBody),
        (status = 422, description = "Invalid query parameters", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<HorseListResponse>, AppError> {
    let query = RequestValidator::validate_list(params)?;
    let (items, total) = HorseService::list_and_count(&state.pool, &query).await?;
    Ok(Json(HorseListResponse::new(items, total, &query)))
}

#[utoipa::path(
    get,
    path = "/api/v1/horses/{id}",
    tag = "horses",
    params(("id" = Uuid, Path, description = "Horse identifier")),
    responses(
        (status = 200, description = "Horse found", body = Horse),
        (status = 404, description = "No horse with this id", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Horse>, AppError> {
    let id = parse_id(&id_str)?;
    let horse = HorseService::get(&state.pool, id)
        .await?
        .ok_or(AppError::HorseNotFound(id))?;
    Ok(Json(horse))
}

#[utoipa::path(
    post,
    path = "/api/v1/horses/",
    tag = "horses",
    request_body = NewHorse,
    responses(
        (status = 201, description = "Horse created", body = Horse),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewHorse>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_create(&body)?;
    let horse = HorseService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(horse)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/horses/{id}",
    tag = "horses",
    params(("id" = Uuid, Path, description = "Horse identifier")),
    request_body = HorsePatch,
    responses(
        (status = 200, description = "Horse updated", body = Horse),
        (status = 404, description = "No horse with this id", body = ErrorBody),
        (status = 422, description = "Invalid payload or id", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(patch): ValidJson<HorsePatch>,
) -> Result<Json<Horse>, AppError> {
    let id = parse_id(&id_str)?;
    let changes = RequestValidator::validate_patch(patch)?;
    let horse = HorseService::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::HorseNotFound(id))?;
    Ok(Json(horse))
}

#[utoipa::path(
    delete,
    path = "/api/v1/horses/{id}",
    tag = "horses",
    params(("id" = Uuid, Path, description = "Horse identifier")),
    responses(
        (status = 204, description = "Horse deleted"),
        (status = 404, description = "No horse with this id", body = ErrorBody),
        (status = 422, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if !HorseService::delete(&state.pool, id).await? {
        return Err(AppError::HorseNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
