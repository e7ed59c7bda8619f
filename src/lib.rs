pub mod api;
pub mod config;
pub mod errors;
pub mod logging;
pub mod validation;

/// Result type for API
pub type Result<T> = std::result::Result<T, errors::ApiError>;
