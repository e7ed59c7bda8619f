use crate::{api::router::ApiRoutes, Result};
use aide::axum::routing::get_with;
use aide::transform::TransformOperation;
use axum::extract::{Path, Query};
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExampleMessage {
    pub message: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ItemPath {
    /// Identifier of the item
    pub item_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ItemQuery {
    /// Optional free-form query string echoed back
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExampleItem {
    pub item_id: i64,
    pub q: Option<String>,
}

/// Routes of the `example` sub-router, relative to its mount prefix
pub fn router<S>() -> Result<ApiRoutes<S>>
where
    S: Clone + Send + Sync + 'static,
{
    ApiRoutes::new()
        .api_route("/", get_with(read_root, read_root_docs))?
        .api_route("/{item_id}", get_with(read_item, read_item_docs))
}

/// # Endpoint: GET /
pub(crate) async fn read_root() -> Json<ExampleMessage> {
    Json(ExampleMessage {
        message: "Hello from the example router".to_string(),
    })
}

fn read_root_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Read root")
        .description("Confirm that the example router is mounted.")
        .response_with::<200, Json<ExampleMessage>, _>(|res| {
            res.example(ExampleMessage {
                message: "Hello from the example router".to_string(),
            })
        })
}

/// # Endpoint: GET /{item_id}
///
/// # Arguments
/// * `item_id` - Integer identifier taken from the path
/// * `q` - Optional query parameter
pub(crate) async fn read_item(
    Path(ItemPath { item_id }): Path<ItemPath>,
    Query(ItemQuery { q }): Query<ItemQuery>,
) -> Json<ExampleItem> {
    tracing::debug!("Reading example item {}", item_id);
    Json(ExampleItem { item_id, q })
}

fn read_item_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Read item")
        .description("Echo the item identifier and optional query.")
        .response_with::<200, Json<ExampleItem>, _>(|res| {
            res.example(ExampleItem {
                item_id: 42,
                q: Some("search".to_string()),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_root() {
        let Json(message) = read_root().await;
        assert_eq!(message.message, "Hello from the example router");
    }

    #[tokio::test]
    async fn test_read_item() {
        let Json(item) = read_item(
            Path(ItemPath { item_id: 7 }),
            Query(ItemQuery {
                q: Some("abc".to_string()),
            }),
        )
        .await;
        assert_eq!(
            item,
            ExampleItem {
                item_id: 7,
                q: Some("abc".to_string())
            }
        );
    }

    #[test]
    fn test_router_paths() {
        let routes = router::<()>().unwrap();
        let paths: Vec<String> = routes.route_docs().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/", "/{item_id}"]);
    }
}
