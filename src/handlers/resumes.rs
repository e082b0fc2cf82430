use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateResume, ResumeFilter, UpdateResume};
use crate::repository::ResumeRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_resume(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateResume>,
) -> Result<impl IntoResponse, AppError> {
    let row = ResumeRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_resume(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = ResumeRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

/// Rows include `user_name` and `user_email` of the owner.
pub async fn list_resumes(
    State(state): State<AppState>,
    Filter(filter): Filter<ResumeFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = ResumeRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_resume(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateResume>,
) -> Result<impl IntoResponse, AppError> {
    ResumeRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("resume", "updated"))
}

pub async fn delete_resume(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    ResumeRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("resume", "deleted"))
}
