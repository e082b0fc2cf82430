//! Entity records, request payloads and list filters for the six managed entities.

pub mod company;
pub mod filter;
pub mod interview;
pub mod recruiter;
pub mod resume;
pub mod user;
pub mod vacancy;

pub use company::*;
pub use filter::{EntityFilter, FilterParams};
pub use interview::*;
pub use recruiter::*;
pub use resume::*;
pub use user::*;
pub use vacancy::*;

use crate::error::AppError;
use crate::sql::Table;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Calendar dates on every request path.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Interview timestamps on create and update, interpreted as UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored record with a soft-delete marker.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {
    /// Singular name used in error messages.
    const KIND: &'static str;
    const TABLE: Table;
}

pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat {
        field,
        expected: "YYYY-MM-DD",
    })
}

pub fn parse_datetime(field: &'static str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
        .map(|n| n.and_utc())
        .map_err(|_| AppError::InvalidDateFormat {
            field,
            expected: "YYYY-MM-DD HH:MM:SS",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendar_dates() {
        let d = parse_date("birthday", "2006-05-21").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2006, 5, 21).unwrap());
    }

    #[test]
    fn rejects_rfc3339_where_a_date_is_expected() {
        let err = parse_date("birthday", "2006-05-21T00:00:00Z").unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidDateFormat { field: "birthday", .. }
        ));
    }

    #[test]
    fn parses_interview_timestamps_as_utc() {
        let t = parse_datetime("interview_date", "2024-12-21 10:00:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-12-21T10:00:00+00:00");
        assert!(parse_datetime("interview_date", "21/12/2024 10:00").is_err());
    }
}
