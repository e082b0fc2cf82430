use super::{parse_date, Entity, EntityFilter, FilterParams};
use crate::error::AppError;
use crate::sql::{Changeset, PgBindValue, Predicate, Table};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const USERS: Table = Table::new("users", "u");

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub gender: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for User {
    const KIND: &'static str = "user";
    const TABLE: Table = USERS;
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub birthday: String,
    #[serde(default)]
    pub gender: String,
}

impl CreateUser {
    /// Domain columns for the insert, with `birthday` parsed.
    pub fn columns(&self) -> Result<Vec<(&'static str, PgBindValue)>, AppError> {
        let birthday = parse_date("birthday", &self.birthday)?;
        Ok(vec![
            ("name", self.name.as_str().into()),
            ("email", self.email.as_str().into()),
            ("phone_number", self.phone_number.as_str().into()),
            ("birthday", birthday.into()),
            ("gender", self.gender.as_str().into()),
        ])
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<String>,
}

impl UpdateUser {
    pub fn changeset(&self) -> Result<Changeset, AppError> {
        let mut c = Changeset::new();
        c.set_opt("name", self.name.clone());
        c.set_opt("email", self.email.clone());
        c.set_opt("phone_number", self.phone_number.clone());
        if let Some(raw) = &self.birthday {
            c.set("birthday", parse_date("birthday", raw)?);
        }
        c.set_opt("gender", self.gender.clone());
        Ok(c)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl EntityFilter for UserFilter {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let p = FilterParams::new(params);
        Ok(UserFilter {
            age: p.non_negative("age")?,
            gender: p.text("gender"),
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
        out
    }
}
