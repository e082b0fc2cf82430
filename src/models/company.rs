use super::{Entity, EntityFilter};
use crate::error::AppError;
use crate::sql::{Changeset, PgBindValue, Predicate, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

pub const COMPANIES: Table = Table::new("companies", "c");

#[derive(Clone, Debug, Serialize, FromRow, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub workers: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl Entity for Company {
    const KIND: &'static str = "company";
    const TABLE: Table = COMPANIES;
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub workers: i32,
}

impl CreateCompany {
    pub fn columns(&self) -> Vec<(&'static str, PgBindValue)> {
        vec![
            ("name", self.name.as_str().into()),
            ("location", self.location.as_str().into()),
            ("workers", self.workers.into()),
        ]
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub location: Option<String>,
    pub workers: Option<i32>,
}

impl UpdateCompany {
    pub fn changeset(&self) -> Changeset {
        let mut c = Changeset::new();
        c.set_opt("name", self.name.clone());
        c.set_opt("location", self.location.clone());
        c.set_opt("workers", self.workers);
        c
    }
}

/// Companies have no list filters; every query key is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyFilter;

impl EntityFilter for CompanyFilter {
    fn from_params(_params: &HashMap<String, String>) -> Result<Self, AppError> {
        Ok(CompanyFilter)
    }

    fn predicates(&self) -> Vec<Predicate> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_is_still_set() {
        let u = UpdateCompany {
            workers: Some(0),
            ..Default::default()
        };
        assert_eq!(u.changeset().get("workers"), Some(&PgBindValue::Int(0)));
    }

    #[test]
    fn any_params_give_no_predicates() {
        let params: HashMap<String, String> =
            [("name".to_string(), "Acme".to_string())].into_iter().collect();
        assert!(CompanyFilter::from_params(&params).unwrap().predicates().is_empty());
    }
}
