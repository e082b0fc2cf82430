//! Field validation and cross-entity rules applied before writes.

pub mod rules;
mod validation;
pub use rules::{age_on, validate_interview_subject, MINIMUM_AGE};
pub use validation::{RequestValidator, Validate};
