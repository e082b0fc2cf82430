use super::{delete_row, fetch_all, get, insert_checked, update_row, Reference};
use crate::error::AppError;
use crate::models::{
    CreateResume, EntityFilter, Resume, ResumeFilter, ResumeWithUser, UpdateResume, RESUMES,
    RESUME_OWNER, USERS,
};
use crate::service::Validate;
use crate::sql;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ResumeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResumeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        ResumeRepository { pool }
    }

    pub async fn create(&self, req: &CreateResume) -> Result<Resume, AppError> {
        req.validate()?;
        let owner = Reference::new(USERS, "user", req.user_id);
        insert_checked(self.pool, req.columns(), &[owner]).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Resume, AppError> {
        get(self.pool, id).await
    }

    /// Rows carry the owner's name and email.
    pub async fn list(&self, filter: &ResumeFilter) -> Result<Vec<ResumeWithUser>, AppError> {
        let q = sql::select_list(&RESUMES, Some(&RESUME_OWNER), &filter.predicates());
        fetch_all(self.pool, &q).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateResume) -> Result<(), AppError> {
        req.validate()?;
        let refs: Vec<Reference> = req
            .user_id
            .map(|u| Reference::new(USERS, "user", u))
            .into_iter()
            .collect();
        update_row::<Resume>(self.pool, id, &req.changeset(), &refs).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<Resume>(self.pool, id).await
    }
}
