//! Handlers for the service endpoints that live outside the documented API.

pub mod docs; // OpenAPI document
pub mod health; // Liveness
pub mod not_found; // Fallback for unknown paths

pub(crate) use docs::get_openapi;
pub(crate) use health::health_check;
pub(crate) use not_found::not_found;
