use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateUser, UserFilter, UpdateUser};
use crate::repository::UserRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let row = UserRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = UserRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

pub async fn list_users(
    State(state): State<AppState>,
    Filter(filter): Filter<UserFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = UserRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateUser>,
) -> Result<impl IntoResponse, AppError> {
    UserRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("user", "updated"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    UserRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("user", "deleted"))
}

/// GET /users/:id/interviews
pub async fn list_user_interviews(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let rows = UserRepository::new(&state.pool).interviews(id).await?;
    Ok(success_many(rows))
}

/// GET /users/:id/resumes
pub async fn list_user_resumes(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let rows = UserRepository::new(&state.pool).resumes(id).await?;
    Ok(success_many(rows))
}
