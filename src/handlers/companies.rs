use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateCompany, CompanyFilter, UpdateCompany};
use crate::repository::CompanyRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_company(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateCompany>,
) -> Result<impl IntoResponse, AppError> {
    let row = CompanyRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_company(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = CompanyRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

pub async fn list_companies(
    State(state): State<AppState>,
    Filter(filter): Filter<CompanyFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CompanyRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_company(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateCompany>,
) -> Result<impl IntoResponse, AppError> {
    CompanyRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("company", "updated"))
}

pub async fn delete_company(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    CompanyRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("company", "deleted"))
}
