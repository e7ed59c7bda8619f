//! Sub-routers mounted by [`api_router`].

use crate::{api::router::ApiRoutes, Result};

pub mod example;

/// Creates the API router and mounts every sub-router under its prefix and tag.
pub fn api_router<S>() -> Result<ApiRoutes<S>>
where
    S: Clone + Send + Sync + 'static,
{
    ApiRoutes::new().include_router(example::router()?, "/example", &["example"])
}
