//! Composition of documented routers under path prefixes and documentation tags.
//!
//! Routes are collected as flat, fully-prefixed paths instead of using
//! [`Router::nest`], so the trailing slash normalization applied in front of
//! the app works for included routes as well.

use crate::{errors::ApiError, validation::validate_prefix, Result};
use aide::axum::{routing::ApiMethodRouter, ApiRouter};
use aide::openapi::{OpenApi, Operation, PathItem, Paths, ReferenceOr, Tag};
use aide::transform::TransformOpenApi;
use axum::Router;

/// Options applied to every route of an included router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    prefix: String,
    tags: Vec<String>,
    deprecated: bool,
    include_in_schema: bool,
}

impl Mount {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            tags: Vec::new(),
            deprecated: false,
            include_in_schema: true,
        }
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Mark every included operation as deprecated
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Keep the routes reachable but leave them out of the OpenAPI document
    pub fn include_in_schema(mut self, include_in_schema: bool) -> Self {
        self.include_in_schema = include_in_schema;
        self
    }
}

struct Route<S> {
    path: String,
    method_router: ApiMethodRouter<S>,
    tags: Vec<String>,
    deprecated: bool,
    include_in_schema: bool,
}

/// Documentation settings of a single registered path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDocs {
    pub path: String,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub include_in_schema: bool,
}

/// An ordered set of documented routes.
pub struct ApiRoutes<S = ()> {
    routes: Vec<Route<S>>,
    tags: Vec<String>,
}

impl<S> Default for ApiRoutes<S> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl<S> ApiRoutes<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a documented route. `path` is relative to wherever this set is later included.
    pub fn api_route(mut self, path: &str, method_router: ApiMethodRouter<S>) -> Result<Self> {
        let path = build_path("", path);
        self.ensure_unique(&path)?;
        self.routes.push(Route {
            path,
            method_router,
            tags: Vec::new(),
            deprecated: false,
            include_in_schema: true,
        });
        Ok(self)
    }

    /// Includes `router` under `prefix`, grouping its operations under `tags`.
    pub fn include_router(self, router: ApiRoutes<S>, prefix: &str, tags: &[&str]) -> Result<Self> {
        self.include_router_with(router, Mount::new(prefix).tags(tags.iter().copied()))
    }

    pub fn include_router_with(mut self, router: ApiRoutes<S>, mount: Mount) -> Result<Self> {
        validate_prefix(&mount.prefix)?;

        for route in router.routes {
            let path = build_path(&mount.prefix, &route.path);
            self.ensure_unique(&path)?;
            self.routes.push(Route {
                path,
                method_router: route.method_router,
                tags: merge_tags(&mount.tags, &route.tags),
                deprecated: mount.deprecated || route.deprecated,
                include_in_schema: mount.include_in_schema && route.include_in_schema,
            });
        }

        if mount.include_in_schema {
            for tag in mount.tags.iter().chain(router.tags.iter()) {
                if !self.tags.contains(tag) {
                    self.tags.push(tag.clone());
                }
            }
        }

        Ok(self)
    }

    /// Documentation settings of every registered route, in registration order
    pub fn route_docs(&self) -> Vec<RouteDocs> {
        self.routes
            .iter()
            .map(|route| RouteDocs {
                path: route.path.clone(),
                tags: route.tags.clone(),
                deprecated: route.deprecated,
                include_in_schema: route.include_in_schema,
            })
            .collect()
    }

    /// Tags declared by the included routers, in declaration order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn finish(self, api: &mut OpenApi) -> Router<S> {
        self.finish_with(api, |docs| docs)
    }

    /// Builds the axum router and fills `api` with the documentation of every route.
    pub fn finish_with<F>(self, api: &mut OpenApi, transform: F) -> Router<S>
    where
        F: FnOnce(TransformOpenApi) -> TransformOpenApi,
    {
        let docs = self.route_docs();
        let tags = self.tags;

        let router = self
            .routes
            .into_iter()
            .fold(ApiRouter::new(), |router, route| {
                router.api_route(&route.path, route.method_router)
            })
            .finish_api_with(api, transform);

        if let Some(paths) = api.paths.as_mut() {
            for route in &docs {
                apply_route_docs(paths, route);
            }
        }

        for name in tags {
            if !api.tags.iter().any(|tag| tag.name == name) {
                api.tags.push(Tag {
                    name,
                    ..Default::default()
                });
            }
        }

        router
    }

    fn ensure_unique(&self, path: &str) -> Result<()> {
        if self.routes.iter().any(|route| route.path == path) {
            return Err(ApiError::DuplicateRoute(path.to_string()));
        }
        Ok(())
    }
}

/// Joins a parent and child path.
///
/// The result never contains `//`, never ends with `/` and always starts with `/`.
pub fn build_path(parent: &str, child: &str) -> String {
    let path = format!("{parent}/{child}");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn merge_tags(outer: &[String], inner: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(outer.len() + inner.len());
    for tag in outer.iter().chain(inner.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

fn apply_route_docs(paths: &mut Paths, route: &RouteDocs) {
    let key = paths
        .paths
        .keys()
        .find(|key| key.as_str() == route.path || key.trim_end_matches('/') == route.path)
        .cloned();
    let Some(key) = key else {
        return;
    };

    if !route.include_in_schema {
        paths.paths.shift_remove(&key);
        return;
    }

    let Some(ReferenceOr::Item(item)) = paths.paths.get_mut(&key) else {
        return;
    };

    for operation in operations_mut(item) {
        // Mount tags come before the operation's own tags
        let own_tags = std::mem::take(&mut operation.tags);
        operation.tags = merge_tags(&route.tags, &own_tags);
        if route.deprecated {
            operation.deprecated = true;
        }
    }
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        &mut item.get,
        &mut item.put,
        &mut item.post,
        &mut item.delete,
        &mut item.options,
        &mut item.head,
        &mut item.patch,
        &mut item.trace,
    ]
    .into_iter()
    .filter_map(Option::as_mut)
}
