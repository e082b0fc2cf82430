//! Request extractors that reject with `AppError` so failures share the error envelope.

mod filter;
mod id;
mod json;

pub use filter::Filter;
pub use id::EntityId;
pub use json::JsonBody;
