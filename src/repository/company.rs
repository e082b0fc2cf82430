use super::{delete_row, get, insert_row, list, update_row};
use crate::error::AppError;
use crate::models::{Company, CompanyFilter, CreateCompany, EntityFilter, UpdateCompany, COMPANIES};
use crate::service::Validate;
use crate::sql;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CompanyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        CompanyRepository { pool }
    }

    pub async fn create(&self, req: &CreateCompany) -> Result<Company, AppError> {
        req.validate()?;
        insert_row(self.pool, req.columns()).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Company, AppError> {
        get(self.pool, id).await
    }

    pub async fn list(&self, filter: &CompanyFilter) -> Result<Vec<Company>, AppError> {
        list(self.pool, &filter.predicates()).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateCompany) -> Result<(), AppError> {
        req.validate()?;
        update_row::<Company>(self.pool, id, &req.changeset(), &[]).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<Company>(self.pool, id).await
    }

    /// True iff a live company has this id. Ids are typed, so textual case never matters.
    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let q = sql::select_by_id(&COMPANIES, id);
        let row: Option<Company> = super::fetch_optional(self.pool, &q).await?;
        Ok(row.is_some())
    }
}
