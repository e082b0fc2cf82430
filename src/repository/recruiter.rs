use super::{delete_row, get, insert_checked, list, update_row, Reference};
use crate::error::AppError;
use crate::models::{
    CreateRecruiter, EntityFilter, Recruiter, RecruiterFilter, UpdateRecruiter, COMPANIES,
};
use crate::service::Validate;
use sqlx::PgPool;
use uuid::Uuid;

pub struct RecruiterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecruiterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        RecruiterRepository { pool }
    }

    /// The company must be live; it stays locked until the insert commits.
    pub async fn create(&self, req: &CreateRecruiter) -> Result<Recruiter, AppError> {
        req.validate()?;
        let columns = req.columns()?;
        let company = Reference::new(COMPANIES, "company", req.company_id);
        insert_checked(self.pool, columns, &[company]).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Recruiter, AppError> {
        get(self.pool, id).await
    }

    pub async fn list(&self, filter: &RecruiterFilter) -> Result<Vec<Recruiter>, AppError> {
        list(self.pool, &filter.predicates()).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateRecruiter) -> Result<(), AppError> {
        req.validate()?;
        let changes = req.changeset()?;
        let refs: Vec<Reference> = req
            .company_id
            .map(|c| Reference::new(COMPANIES, "company", c))
            .into_iter()
            .collect();
        update_row::<Recruiter>(self.pool, id, &changes, &refs).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<Recruiter>(self.pool, id).await
    }
}
