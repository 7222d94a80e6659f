//! REST client for the forms API

mod client;
mod error;
mod traits;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use traits::MockApiClientTrait;
