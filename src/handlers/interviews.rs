use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateInterview, InterviewFilter, UpdateInterview};
use crate::repository::InterviewRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// POST /interviews. Rule violations (age, position) come back as 400 with their own codes.
pub async fn create_interview(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateInterview>,
) -> Result<impl IntoResponse, AppError> {
    let row = InterviewRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_interview(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = InterviewRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

pub async fn list_interviews(
    State(state): State<AppState>,
    Filter(filter): Filter<InterviewFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = InterviewRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_interview(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateInterview>,
) -> Result<impl IntoResponse, AppError> {
    InterviewRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("interview", "updated"))
}

pub async fn delete_interview(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    InterviewRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("interview", "deleted"))
}
