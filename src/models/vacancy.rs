use super::{Entity, EntityFilter, FilterParams};
use crate::error::AppError;
use crate::sql::{Changeset, PgBindValue, Predicate, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const VACANCIES: Table = Table::new("vacancies", "v");

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct Vacancy {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub min_exp: i32,
    pub description: String,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for Vacancy {
    const KIND: &'static str = "vacancy";
    const TABLE: Table = VACANCIES;
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateVacancy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub min_exp: i32,
    #[serde(default)]
    pub description: String,
    /// Nil when omitted so the field check reports it instead of the JSON decoder.
    #[serde(default)]
    pub company_id: Uuid,
}

impl CreateVacancy {
    pub fn columns(&self) -> Vec<(&'static str, PgBindValue)> {
        vec![
            ("name", self.name.as_str().into()),
            ("position", self.position.as_str().into()),
            ("min_exp", self.min_exp.into()),
            ("description", self.description.as_str().into()),
            ("company_id", self.company_id.into()),
        ]
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateVacancy {
    pub name: Option<String>,
    pub position: Option<String>,
    pub min_exp: Option<i32>,
    pub description: Option<String>,
    pub company_id: Option<Uuid>,
}

impl UpdateVacancy {
    pub fn changeset(&self) -> Changeset {
        let mut c = Changeset::new();
        c.set_opt("name", self.name.clone());
        c.set_opt("position", self.position.clone());
        c.set_opt("min_exp", self.min_exp);
        c.set_opt("description", self.description.clone());
        c.set_opt("company_id", self.company_id);
        c
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VacancyFilter {
    pub position: Option<String>,
    pub min_exp: Option<i32>,
    pub company_id: Option<Uuid>,
}

impl EntityFilter for VacancyFilter {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let p = FilterParams::new(params);
        Ok(VacancyFilter {
            position: p.text("position"),
            min_exp: p.int("min_exp")?,
            company_id: p.uuid("company_id")?,
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
            out.push(Predicate::at_least("min_exp", n));
        }
        if let Some(id) = self.company_id {
            out.push(Predicate::eq("company_id", id));
        }
        out
    }
}
