use super::{delete_row, fetch_all, get, insert_row, list, update_row};
use crate::error::AppError;
use crate::models::{
    CreateUser, EntityFilter, Interview, InterviewFilter, ResumeFilter, ResumeWithUser,
    UpdateUser, User, UserFilter, RESUMES, RESUME_OWNER,
};
use crate::service::Validate;
use crate::sql;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        UserRepository { pool }
    }

    pub async fn create(&self, req: &CreateUser) -> Result<User, AppError> {
        req.validate()?;
        let columns = req.columns()?;
        insert_row(self.pool, columns).await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        get(self.pool, id).await
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        list(self.pool, &filter.predicates()).await
    }

    pub async fn update(&self, id: Uuid, req: &UpdateUser) -> Result<(), AppError> {
        req.validate()?;
        let changes = req.changeset()?;
        update_row::<User>(self.pool, id, &changes, &[]).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<User>(self.pool, id).await
    }

    /// Live interviews where the user is the subject. Unknown or deleted users are not found.
    pub async fn interviews(&self, id: Uuid) -> Result<Vec<Interview>, AppError> {
        self.get(id).await?;
        list(self.pool, &InterviewFilter::for_user(id).predicates()).await
    }

    pub async fn resumes(&self, id: Uuid) -> Result<Vec<ResumeWithUser>, AppError> {
        self.get(id).await?;
        let filter = ResumeFilter {
            user_id: Some(id),
            ..Default::default()
        };
        let q = sql::select_list(&RESUMES, Some(&RESUME_OWNER), &filter.predicates());
        fetch_all(self.pool, &q).await
    }
}
