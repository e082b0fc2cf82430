//! HR platform backend: CRUD REST service for users, companies, recruiters, vacancies,
//! resumes and interviews on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, RuleViolation};
pub use response::{acknowledged, success_many, success_one};
pub use routes::{app_router, app_router_from_config, common_routes_with_ready, entity_routes};
pub use state::AppState;
pub use store::{connect_pool, ensure_database_exists, ensure_tables};
