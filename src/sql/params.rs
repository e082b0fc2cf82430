//! Typed values bound to PostgreSQL placeholders.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use uuid::Uuid;

/// A value that can be bound to a `$n` placeholder. One variant per column type in use.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Int(i32),
    BigInt(i64),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl PgBindValue {
    pub fn add_to(&self, args: &mut PgArguments) -> Result<(), sqlx::Error> {
        let res = match self {
            PgBindValue::Int(n) => args.add(*n),
            PgBindValue::BigInt(n) => args.add(*n),
            PgBindValue::Text(s) => args.add(s.clone()),
            PgBindValue::Uuid(u) => args.add(*u),
            PgBindValue::Date(d) => args.add(*d),
            PgBindValue::Timestamp(t) => args.add(*t),
        };
        res.map_err(sqlx::Error::Encode)
    }
}

/// Collect params into sqlx arguments in placeholder order.
pub fn arguments(params: &[PgBindValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        p.add_to(&mut args)?;
    }
    Ok(args)
}

impl From<i32> for PgBindValue {
    fn from(v: i32) -> Self {
        PgBindValue::Int(v)
    }
}

impl From<i64> for PgBindValue {
    fn from(v: i64) -> Self {
        PgBindValue::BigInt(v)
    }
}

impl From<String> for PgBindValue {
    fn from(v: String) -> Self {
        PgBindValue::Text(v)
    }
}

impl From<&str> for PgBindValue {
    fn from(v: &str) -> Self {
        PgBindValue::Text(v.to_string())
    }
}

impl From<Uuid> for PgBindValue {
    fn from(v: Uuid) -> Self {
        PgBindValue::Uuid(v)
    }
}

impl From<NaiveDate> for PgBindValue {
    fn from(v: NaiveDate) -> Self {
        PgBindValue::Date(v)
    }
}

impl From<DateTime<Utc>> for PgBindValue {
    fn from(v: DateTime<Utc>) -> Self {
        PgBindValue::Timestamp(v)
    }
}
