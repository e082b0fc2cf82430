//! HTTP handlers: decode the request, call the entity repository, wrap the result.

pub mod companies;
pub mod interviews;
pub mod recruiters;
pub mod resumes;
pub mod users;
pub mod vacancies;
