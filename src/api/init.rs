use crate::{
    api::{
        endpoints::api_router,
        index::{index, DocsLinks, Index},
        router::{build_path, ApiRoutes, Mount},
    },
    config::Config,
    errors::ApiError,
    Result,
};
use aide::openapi::OpenApi;
use aide::redoc::Redoc;
use aide::scalar::Scalar;
use axum::{
    error_handling::HandleErrorLayer,
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::Response,
    routing::get,
    BoxError, Extension,
};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tower::{
    buffer::BufferLayer, limit::RateLimitLayer, util::BoxCloneService, ServiceBuilder,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::*;

/// The fully assembled service.
///
/// The global rate limit and trailing slash normalization wrap the router,
/// so they run before routing.
pub type App = BoxCloneService<Request, Response, Infallible>;

const SCALAR_PATH: &str = "/docs";
const REDOC_PATH: &str = "/redoc";

pub fn initialize_app(config: &Config) -> Result<App> {
    build_app(config, api_router()?)
}

/// Assembles the service around `api_routes`, mounted under `config.api_prefix`
pub(crate) fn build_app(config: &Config, api_routes: ApiRoutes) -> Result<App> {
    let routes = ApiRoutes::new().include_router_with(api_routes, Mount::new(&config.api_prefix))?;

    let openapi_path = build_path(&config.api_prefix, "/openapi.json");

    // Paths served outside the documented API must not collide with it
    let mut service_paths = vec!["/".to_string(), "/health".to_string()];
    if config.docs_enabled {
        service_paths.extend([
            openapi_path.clone(),
            SCALAR_PATH.to_string(),
            REDOC_PATH.to_string(),
        ]);
    }
    let route_docs = routes.route_docs();
    if let Some(route) = route_docs
        .iter()
        .find(|route| service_paths.contains(&route.path))
    {
        return Err(ApiError::DuplicateRoute(route.path.clone()));
    }
    let route_count = route_docs.len();

    let mut api = OpenApi::default();
    let router = routes.finish_with(&mut api, |docs| {
        docs.title(&config.project_name)
            .version(env!("CARGO_PKG_VERSION"))
            .description(&format!("# {}", config.project_name))
    });

    let (router, docs_links) = if config.docs_enabled {
        let router = router
            .route(&openapi_path, get(get_openapi))
            .route(
                SCALAR_PATH,
                get(Scalar::new(&openapi_path)
                    .with_title(&config.project_name)
                    .axum_handler()),
            )
            .route(
                REDOC_PATH,
                get(Redoc::new(&openapi_path)
                    .with_title(&config.project_name)
                    .axum_handler()),
            );
        let links = DocsLinks {
            openapi: openapi_path.clone(),
            scalar: SCALAR_PATH.to_string(),
            redoc: REDOC_PATH.to_string(),
        };
        (router, Some(links))
    } else {
        (router, None)
    };

    let index_body = Index::new(&config.project_name, docs_links, &api);

    let error_handler = || {
        ServiceBuilder::new().layer(HandleErrorLayer::new(|err: BoxError| async move {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unhandled error: {}", err),
            )
        }))
    };

    let global_rate_limit = |req_per_sec: u64| {
        ServiceBuilder::new()
            .layer(error_handler())
            .layer(BufferLayer::new(1024))
            .layer(RateLimitLayer::new(req_per_sec, Duration::from_secs(1)))
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let router = router
        .route("/", get(index))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(CompressionLayer::new().zstd(true));

    let router = match cors_layer(&config.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    // Layers added last run first: the request id is set before the trace span opens
    let router = router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(Extension(Arc::new(index_body)))
        .layer(Extension(Arc::new(api)));

    tracing::info!(
        "Mounted {} API routes under \"{}/\"",
        route_count,
        config.api_prefix
    );

    let app = global_rate_limit(config.rate_limit_per_second)
        .layer(NormalizePathLayer::trim_trailing_slash())
        .service(router);

    Ok(BoxCloneService::new(app))
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim_end_matches('/').parse() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Skipping CORS origin {}: {}", origin, err);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
