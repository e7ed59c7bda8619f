// src/api/index.rs

use aide::openapi::{OpenApi, Operation, PathItem, ReferenceOr};
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// Links to the generated documentation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocsLinks {
    pub openapi: String,
    pub scalar: String,
    pub redoc: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: &'static str,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of the index endpoint, built once at startup
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Index {
    pub name: String,
    pub version: String,
    pub docs: Option<DocsLinks>,
    pub endpoints: Vec<Endpoint>,
}

impl Index {
    pub fn new(name: &str, docs: Option<DocsLinks>, api: &OpenApi) -> Self {
        let mut endpoints = vec![
            Endpoint {
                path: "/".to_string(),
                method: "GET",
                tags: Vec::new(),
                summary: None,
                description: Some("API endpoint documentation".to_string()),
            },
            Endpoint {
                path: "/health".to_string(),
                method: "GET",
                tags: Vec::new(),
                summary: None,
                description: Some("Service health".to_string()),
            },
        ];

        let documented = api.paths.iter().flat_map(|paths| paths.paths.iter());
        for (path, item) in documented {
            let ReferenceOr::Item(item) = item else {
                continue;
            };
            endpoints.extend(operations(item).map(|(method, operation)| Endpoint {
                path: path.clone(),
                method,
                tags: operation.tags.clone(),
                summary: operation.summary.clone(),
                description: operation.description.clone(),
            }));
        }

        Self {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            docs,
            endpoints,
        }
    }
}

fn operations(item: &PathItem) -> impl Iterator<Item = (&'static str, &Operation)> {
    [
        ("GET", &item.get),
        ("PUT", &item.put),
        ("POST", &item.post),
        ("DELETE", &item.delete),
        ("OPTIONS", &item.options),
        ("HEAD", &item.head),
        ("PATCH", &item.patch),
        ("TRACE", &item.trace),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.as_ref().map(|operation| (method, operation)))
}

/// Handler for the index endpoint that provides API documentation
///
/// # Endpoint: GET /
pub(crate) async fn index(Extension(index): Extension<Arc<Index>>) -> Json<Index> {
    Json(index.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::api_router;

    #[test]
    fn test_index_lists_documented_endpoints() {
        let mut api = OpenApi::default();
        let _router = api_router::<()>().unwrap().finish(&mut api);

        let index = Index::new("demo", None, &api);
        assert_eq!(index.name, "demo");
        assert!(index.docs.is_none());

        let example: Vec<&Endpoint> = index
            .endpoints
            .iter()
            .filter(|endpoint| endpoint.path.starts_with("/example"))
            .collect();
        assert_eq!(example.len(), 2);
        assert!(example
            .iter()
            .all(|endpoint| endpoint.method == "GET" && endpoint.tags == vec!["example"]));
        assert!(example
            .iter()
            .any(|endpoint| endpoint.summary.as_deref() == Some("Read item")));

        assert_eq!(index.endpoints[0].path, "/");
        assert_eq!(index.endpoints[1].path, "/health");
    }
}
