use super::{parse_date, Entity, EntityFilter, FilterParams};
use crate::error::AppError;
use crate::sql::{Changeset, PgBindValue, Predicate, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const RECRUITERS: Table = Table::new("recruiters", "rc");

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct Recruiter {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub gender: String,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for Recruiter {
    const KIND: &'static str = "recruiter";
    const TABLE: Table = RECRUITERS;
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateRecruiter {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: String,
    pub gender: String,
    pub company_id: Uuid,
}

impl CreateRecruiter {
    pub fn columns(&self) -> Result<Vec<(&'static str, PgBindValue)>, AppError> {
        let birthday = parse_date("birthday", &self.birthday)?;
        Ok(vec![
            ("name", self.name.as_str().into()),
            ("email", self.email.as_str().into()),
            ("phone_number", self.phone_number.as_str().into()),
            ("birthday", birthday.into()),
            ("gender", self.gender.as_str().into()),
            ("company_id", self.company_id.into()),
        ])
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateRecruiter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<String>,
    pub company_id: Option<Uuid>,
}

impl UpdateRecruiter {
    pub fn changeset(&self) -> Result<Changeset, AppError> {
        let mut c = Changeset::new();
        c.set_opt("name", self.name.clone());
        c.set_opt("email", self.email.clone());
        c.set_opt("phone_number", self.phone_number.clone());
        if let Some(raw) = &self.birthday {
            c.set("birthday", parse_date("birthday", raw)?);
        }
        c.set_opt("gender", self.gender.clone());
        c.set_opt("company_id", self.company_id);
        Ok(c)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecruiterFilter {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub company_id: Option<Uuid>,
}

impl EntityFilter for RecruiterFilter {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let p = FilterParams::new(params);
        Ok(RecruiterFilter {
            age: p.non_negative("age")?,
            gender: p.text("gender"),
            company_id: p.uuid("company_id")?,
        })
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(years) = self.age {
            out.push(Predicate::AgeEquals {
                column: "birthday",
                years,
            });
        }
        if let Some(g) = &self.gender {
            out.push(Predicate::eq("gender", g.as_str()));
        }
        if let Some(id) = self.company_id {
            out.push(Predicate::eq("company_id", id));
        }
        out
    }
}
