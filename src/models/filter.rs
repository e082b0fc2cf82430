//! Query-string filters: parsed once into typed per-entity structs, then rendered as predicates.

use crate::error::AppError;
use crate::sql::Predicate;
use std::collections::HashMap;
use uuid::Uuid;

/// Allow-listed filter keys for one entity. Keys outside the list are ignored.
pub trait EntityFilter: Sized {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError>;
    fn predicates(&self) -> Vec<Predicate>;
}

/// Typed accessors over raw query params. Blank values count as absent.
pub struct FilterParams<'a> {
    params: &'a HashMap<String, String>,
}

impl<'a> FilterParams<'a> {
    pub fn new(params: &'a HashMap<String, String>) -> Self {
        FilterParams { params }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.params
            .get(key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.raw(key).map(str::to_string)
    }

    pub fn int(&self, key: &str) -> Result<Option<i32>, AppError> {
        self.raw(key)
            .map(|s| {
                s.parse::<i32>().map_err(|_| AppError::InvalidFilter {
                    key: key.to_string(),
                    reason: format!("expected an integer, got '{}'", s),
                })
            })
            .transpose()
    }

    pub fn non_negative(&self, key: &str) -> Result<Option<i32>, AppError> {
        match self.int(key)? {
            Some(n) if n < 0 => Err(AppError::InvalidFilter {
                key: key.to_string(),
                reason: "must not be negative".into(),
            }),
            other => Ok(other),
        }
    }

    pub fn uuid(&self, key: &str) -> Result<Option<Uuid>, AppError> {
        self.raw(key)
            .map(|s| {
                Uuid::parse_str(s).map_err(|_| AppError::InvalidFilter {
                    key: key.to_string(),
                    reason: format!("expected a UUID, got '{}'", s),
                })
            })
            .transpose()
    }
}
