//! Per-field request validation. Create payloads check every field; update payloads only the fields present.

use crate::error::AppError;
use crate::models::{
    CreateCompany, CreateInterview, CreateRecruiter, CreateResume, CreateUser, CreateVacancy,
    UpdateCompany, UpdateInterview, UpdateRecruiter, UpdateResume, UpdateUser, UpdateVacancy,
};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Field checks applied before any write.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn required(col: &str, v: &str) -> Result<(), AppError> {
        if v.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", col)));
        }
        Ok(())
    }

    pub fn required_id(col: &str, v: Uuid) -> Result<(), AppError> {
        if v.is_nil() {
            return Err(AppError::Validation(format!("{} is required", col)));
        }
        Ok(())
    }

    pub fn non_negative(col: &str, v: i32) -> Result<(), AppError> {
        if v < 0 {
            return Err(AppError::Validation(format!("{} must be at least 0", col)));
        }
        Ok(())
    }

    pub fn email(col: &str, v: &str) -> Result<(), AppError> {
        if !email_pattern().is_some_and(|re| re.is_match(v.trim())) {
            return Err(AppError::Validation(format!("{} must be a valid email", col)));
        }
        Ok(())
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

fn optional<T: ?Sized>(
    v: Option<&T>,
    check: impl FnOnce(&T) -> Result<(), AppError>,
) -> Result<(), AppError> {
    match v {
        Some(v) => check(v),
        None => Ok(()),
    }
}

impl Validate for CreateUser {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required("name", &self.name)?;
        RequestValidator::required("email", &self.email)?;
        RequestValidator::email("email", &self.email)
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.name.as_deref(), |v| RequestValidator::required("name", v))?;
        optional(self.email.as_deref(), |v| RequestValidator::email("email", v))
    }
}

impl Validate for CreateCompany {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required("name", &self.name)?;
        RequestValidator::non_negative("workers", self.workers)
    }
}

impl Validate for UpdateCompany {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.name.as_deref(), |v| RequestValidator::required("name", v))?;
        optional(self.workers.as_ref(), |v| RequestValidator::non_negative("workers", *v))
    }
}

impl Validate for CreateRecruiter {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required("name", &self.name)?;
        RequestValidator::required("email", &self.email)?;
        RequestValidator::email("email", &self.email)?;
        RequestValidator::required("phone_number", &self.phone_number)?;
        RequestValidator::required("gender", &self.gender)?;
        RequestValidator::required_id("company_id", self.company_id)
    }
}

impl Validate for UpdateRecruiter {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.name.as_deref(), |v| RequestValidator::required("name", v))?;
        optional(self.email.as_deref(), |v| RequestValidator::email("email", v))?;
        optional(self.phone_number.as_deref(), |v| {
            RequestValidator::required("phone_number", v)
        })?;
        optional(self.gender.as_deref(), |v| RequestValidator::required("gender", v))?;
        optional(self.company_id.as_ref(), |v| {
            RequestValidator::required_id("company_id", *v)
        })
    }
}

impl Validate for CreateVacancy {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required("name", &self.name)?;
        RequestValidator::required("position", &self.position)?;
        RequestValidator::required("description", &self.description)?;
        RequestValidator::required_id("company_id", self.company_id)?;
        RequestValidator::non_negative("min_exp", self.min_exp)
    }
}

impl Validate for UpdateVacancy {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.name.as_deref(), |v| RequestValidator::required("name", v))?;
        optional(self.position.as_deref(), |v| RequestValidator::required("position", v))?;
        optional(self.description.as_deref(), |v| {
            RequestValidator::required("description", v)
        })?;
        optional(self.min_exp.as_ref(), |v| RequestValidator::non_negative("min_exp", *v))?;
        optional(self.company_id.as_ref(), |v| {
            RequestValidator::required_id("company_id", *v)
        })
    }
}

impl Validate for CreateResume {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required("position", &self.position)?;
        RequestValidator::non_negative("experience", self.experience)?;
        RequestValidator::required_id("user_id", self.user_id)
    }
}

impl Validate for UpdateResume {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.position.as_deref(), |v| RequestValidator::required("position", v))?;
        optional(self.experience.as_ref(), |v| {
            RequestValidator::non_negative("experience", *v)
        })?;
        optional(self.user_id.as_ref(), |v| RequestValidator::required_id("user_id", *v))
    }
}

impl Validate for CreateInterview {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::required_id("user_id", self.user_id)?;
        RequestValidator::required_id("vacancy_id", self.vacancy_id)?;
        RequestValidator::required_id("recruiter_id", self.recruiter_id)?;
        RequestValidator::required("interview_date", &self.interview_date)
    }
}

impl Validate for UpdateInterview {
    fn validate(&self) -> Result<(), AppError> {
        optional(self.user_id.as_ref(), |v| RequestValidator::required_id("user_id", *v))?;
        optional(self.vacancy_id.as_ref(), |v| {
            RequestValidator::required_id("vacancy_id", *v)
        })?;
        optional(self.recruiter_id.as_ref(), |v| {
            RequestValidator::required_id("recruiter_id", *v)
        })?;
        optional(self.interview_date.as_deref(), |v| {
            RequestValidator::required("interview_date", v)
        })
    }
}
