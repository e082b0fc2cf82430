use super::{
    delete_row, ensure_live, fetch_all, fetch_one, get, insert_row, list, update_row, Reference,
};
use crate::error::AppError;
use crate::models::{
    CreateInterview, EntityFilter, Interview, InterviewFilter, Resume, UpdateInterview, User,
    Vacancy, RECRUITERS, RESUMES, USERS, VACANCIES,
};
use crate::service::{validate_interview_subject, Validate};
use crate::sql::{self, Predicate};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct InterviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InterviewRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        InterviewRepository { pool }
    }

    /// Schedules an interview once the subject, vacancy and recruiter are live, the subject
    /// is of age and holds a resume for the vacancy's exact position.
    pub async fn create(&self, req: &CreateInterview) -> Result<Interview, AppError> {
        req.validate()?;
        let columns = req.columns()?;

        let mut tx = self.pool.begin().await?;
        for r in references(req.user_id, req.vacancy_id, req.recruiter_id) {
            ensure_live(&mut tx, &r).await?;
        }

        let user: User = fetch_one(&mut *tx, &sql::select_by_id(&USERS, req.user_id)).await?;
        let vacancy: Vacancy =
            fetch_one(&mut *tx, &sql::select_by_id(&VACANCIES, req.vacancy_id)).await?;
        let resumes: Vec<Resume> = fetch_all(
            &mut *tx,
            &sql::select_list(&RESUMES, None, &[Predicate::eq("user_id", req.user_id)]),
        )
        .await?;
        let positions: Vec<String> = resumes.into_iter().map(|r| r.position).collect();

        validate_interview_subject(
            Utc::now().date_naive(),
            user.birthday,
            &positions,
            &vacancy.position,
        )?;

        let row = insert_row::<_, Interview>(&mut *tx, columns).await?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Interview, AppError> {
        get(self.pool, id).await
    }

    pub async fn list(&self, filter: &InterviewFilter) -> Result<Vec<Interview>, AppError> {
        list(self.pool, &filter.predicates()).await
    }

    /// Changed references must be live. Age and position rules apply at scheduling only.
    pub async fn update(&self, id: Uuid, req: &UpdateInterview) -> Result<(), AppError> {
        req.validate()?;
        let changes = req.changeset()?;
        let mut refs = Vec::new();
        if let Some(u) = req.user_id {
            refs.push(Reference::new(USERS, "user", u));
        }
        if let Some(v) = req.vacancy_id {
            refs.push(Reference::new(VACANCIES, "vacancy", v));
        }
        if let Some(r) = req.recruiter_id {
            refs.push(Reference::new(RECRUITERS, "recruiter", r));
        }
        update_row::<Interview>(self.pool, id, &changes, &refs).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        delete_row::<Interview>(self.pool, id).await
    }
}

fn references(user: Uuid, vacancy: Uuid, recruiter: Uuid) -> [Reference; 3] {
    [
        Reference::new(USERS, "user", user),
        Reference::new(VACANCIES, "vacancy", vacancy),
        Reference::new(RECRUITERS, "recruiter", recruiter),
    ]
}
