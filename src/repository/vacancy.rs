use super::{delete_row, get, insert_checked, list, update_row, Reference};
use crate::error::AppError;
use crate::models::{CreateVacancy, EntityFilter, UpdateVacancy, Vacancy, VacancyFilter, COMPANIES};
use crate::service::Validate;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VacancyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VacancyRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        VacancyRepository { pool }
    }

    pub async fn create(&self, req: &CreateVacancy) -> Result<Vacancy, AppError> {
        req.validate()?;
        let company = Reference::new(COMPANIES, "company", req.company_id);
        insert_checked(self.pool, req.columns(), &[company]).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Vacancy, AppError> {
        get(self.pool, id).await
    }

    pub async fn list(&self, filter: &VacancyFilter) -> Result<Vec<Vacancy>, AppError> {
        list(self.pool, &filter.predicates()).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateVacancy) -> Result<(), AppError> {
        req.validate()?;
        let refs: Vec<Reference> = req
            .company_id
            .map(|c| Reference::new(COMPANIES, "company", c))
            .into_iter()
            .collect();
        update_row::<Vacancy>(self.pool, id, &req.changeset(), &refs).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<Vacancy>(self.pool, id).await
    }
}
