use super::{Entity, EntityFilter, FilterParams};
use crate::error::AppError;
use crate::sql::{Changeset, Join, PgBindValue, Predicate, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const RESUMES: Table = Table::new("resumes", "r");

/// Owner name and email pulled into resume list rows.
pub const RESUME_OWNER: Join = Join {
    columns: "u.name AS user_name, u.email AS user_email",
    clause: "JOIN users u ON u.id = r.user_id AND u.deleted_at = 0",
};

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct Resume {
    pub id: Uuid,
    pub position: String,
    pub experience: i32,
    pub description: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for Resume {
    const KIND: &'static str = "resume";
    const TABLE: Table = RESUMES;
}

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct ResumeWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub resume: Resume,
    pub user_name: String,
    pub user_email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateResume {
    pub position: String,
    #[serde(default)]
    pub experience: i32,
    #[serde(default)]
    pub description: String,
    pub user_id: Uuid,
}

impl CreateResume {
    pub fn columns(&self) -> Vec<(&'static str, PgBindValue)> {
        vec![
            ("position", self.position.as_str().into()),
            ("experience", self.experience.into()),
            ("description", self.description.as_str().into()),
            ("user_id", self.user_id.into()),
        ]
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateResume {
    pub position: Option<String>,
    pub experience: Option<i32>,
    pub description: Option<String>,
    pub user_id: Option<Uuid>,
}

impl UpdateResume {
    pub fn changeset(&self) -> Changeset {
        let mut c = Changeset::new();
        c.set_opt("position", self.position.clone());
        c.set_opt("experience", self.experience);
        c.set_opt("description", self.description.clone());
        c.set_opt("user_id", self.user_id);
        c
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResumeFilter {
    pub position: Option<String>,
    pub min_exp: Option<i32>,
    pub user_id: Option<Uuid>,
}

impl EntityFilter for ResumeFilter {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let p = FilterParams::new(params);
        Ok(ResumeFilter {
            position: p.text("position"),
            min_exp: p.int("min_exp")?,
            user_id: p.uuid("user_id")?,
        })
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(needle) = &self.position {
            out.push(Predicate::Contains {
                column: "position",
                needle: needle.clone(),
            });
        }
        if let Some(n) = self.min_exp {
            out.push(Predicate::at_least("experience", n));
        }
        if let Some(id) = self.user_id {
            out.push(Predicate::eq("user_id", id));
        }
        out
    }
}
