use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateRecruiter, RecruiterFilter, UpdateRecruiter};
use crate::repository::RecruiterRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_recruiter(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRecruiter>,
) -> Result<impl IntoResponse, AppError> {
    let row = RecruiterRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_recruiter(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = RecruiterRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

pub async fn list_recruiters(
    State(state): State<AppState>,
    Filter(filter): Filter<RecruiterFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = RecruiterRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_recruiter(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateRecruiter>,
) -> Result<impl IntoResponse, AppError> {
    RecruiterRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("recruiter", "updated"))
}

pub async fn delete_recruiter(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    RecruiterRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("recruiter", "deleted"))
}
