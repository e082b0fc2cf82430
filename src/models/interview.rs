use super::{parse_datetime, Entity, EntityFilter, FilterParams};
use crate::error::AppError;
use crate::sql::{Changeset, PgBindValue, Predicate, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const INTERVIEWS: Table = Table::new("interviews", "i");

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct Interview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vacancy_id: Uuid,
    pub recruiter_id: Uuid,
    pub interview_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for Interview {
    const KIND: &'static str = "interview";
    const TABLE: Table = INTERVIEWS;
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateInterview {
    pub user_id: Uuid,
    pub vacancy_id: Uuid,
    pub recruiter_id: Uuid,
    pub interview_date: String,
}

impl CreateInterview {
    pub fn columns(&self) -> Result<Vec<(&'static str, PgBindValue)>, AppError> {
        let at = parse_datetime("interview_date", &self.interview_date)?;
        Ok(vec![
            ("user_id", self.user_id.into()),
            ("vacancy_id", self.vacancy_id.into()),
            ("recruiter_id", self.recruiter_id.into()),
            ("interview_date", at.into()),
        ])
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateInterview {
    pub user_id: Option<Uuid>,
    pub vacancy_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub interview_date: Option<String>,
}

impl UpdateInterview {
    pub fn changeset(&self) -> Result<Changeset, AppError> {
        let mut c = Changeset::new();
        c.set_opt("user_id", self.user_id);
        c.set_opt("vacancy_id", self.vacancy_id);
        c.set_opt("recruiter_id", self.recruiter_id);
        if let Some(raw) = &self.interview_date {
            c.set("interview_date", parse_datetime("interview_date", raw)?);
        }
        Ok(c)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterviewFilter {
    pub company_id: Option<Uuid>,
    pub position: Option<String>,
    pub experience: Option<i32>,
    pub user_id: Option<Uuid>,
}

impl InterviewFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        InterviewFilter {
            user_id: Some(user_id),
            ..Default::default()
        }
    }
}

impl EntityFilter for InterviewFilter {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let p = FilterParams::new(params);
        Ok(InterviewFilter {
            company_id: p.uuid("company_id")?,
            position: p.text("position"),
            experience: p.int("experience")?,
            user_id: p.uuid("user_id")?,
        })
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(id) = self.company_id {
            out.push(Predicate::InSubquery {
                column: "recruiter_id",
                table: "recruiters",
                select: "id",
                inner: Box::new(Predicate::eq("company_id", id)),
            });
        }
        if let Some(needle) = &self.position {
            out.push(Predicate::InSubquery {
                column: "vacancy_id",
                table: "vacancies",
                select: "id",
                inner: Box::new(Predicate::Contains {
                    column: "position",
                    needle: needle.clone(),
                }),
            });
        }
        if let Some(years) = self.experience {
            out.push(Predicate::InSubquery {
                column: "user_id",
                table: "resumes",
                select: "user_id",
                inner: Box::new(Predicate::at_least("experience", years)),
            });
        }
        if let Some(id) = self.user_id {
            out.push(Predicate::eq("user_id", id));
        }
        out
    }
}
