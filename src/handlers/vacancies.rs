use crate::error::AppError;
use crate::extractors::{EntityId, Filter, JsonBody};
use crate::models::{CreateVacancy, VacancyFilter, UpdateVacancy};
use crate::repository::VacancyRepository;
use crate::response::{acknowledged, success_many, success_one, success_one_ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_vacancy(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateVacancy>,
) -> Result<impl IntoResponse, AppError> {
    let row = VacancyRepository::new(&state.pool).create(&body).await?;
    Ok(success_one(row))
}

pub async fn get_vacancy(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let row = VacancyRepository::new(&state.pool).get(id).await?;
    Ok(success_one_ok(row))
}

pub async fn list_vacancies(
    State(state): State<AppState>,
    Filter(filter): Filter<VacancyFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = VacancyRepository::new(&state.pool).list(&filter).await?;
    Ok(success_many(rows))
}

pub async fn update_vacancy(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<UpdateVacancy>,
) -> Result<impl IntoResponse, AppError> {
    VacancyRepository::new(&state.pool).update(id, &body).await?;
    Ok(acknowledged("vacancy", "updated"))
}

pub async fn delete_vacancy(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    VacancyRepository::new(&state.pool).delete(id).await?;
    Ok(acknowledged("vacancy", "deleted"))
}
