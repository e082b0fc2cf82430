//! Runtime configuration.

mod app;
pub use app::AppConfig;
