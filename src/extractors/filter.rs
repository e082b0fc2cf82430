//! Extract a typed list filter from the query string.

use crate::error::AppError;
use crate::models::EntityFilter;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Filter<F>(pub F);

#[async_trait]
impl<S, F> FromRequestParts<S> for Filter<F>
where
    S: Send + Sync,
    F: EntityFilter + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        F::from_params(&params).map(Filter)
    }
}
