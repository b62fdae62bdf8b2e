//! Notion API client.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::types::{ApiErrorBody, PageObject, QueryRequest, QueryResponse};

pub const NOTION_API_BASE: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;

#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Notion rejected the integration secret")]
    Unauthorized,

    #[error("Database not found or not shared with the integration: {0}")]
    DatabaseNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Notion API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    secret: String,
    base_url: String,
}

impl NotionClient {
    pub fn with_base_url(secret: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret: secret.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Query every page of a database, following pagination cursors.
    #[instrument(skip(self), level = "info")]
    pub async fn query_database(&self, database_id: &str) -> Result<Vec<PageObject>, NotionError> {
        let url = format!("{}/v1/databases/{}/query", self.base_url, database_id);
        let mut pages = Vec::new();
        let mut cursor = None;

        loop {
            let body = QueryRequest {
                start_cursor: cursor.take(),
                page_size: Some(PAGE_SIZE),
            };

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.secret)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await?;

            let batch: QueryResponse = self.handle_response(response, database_id).await?;
            debug!(count = batch.results.len(), has_more = batch.has_more, "Fetched results");
            pages.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(pages)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        database_id: &str,
    ) -> Result<T, NotionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        match status.as_u16() {
            401 => Err(NotionError::Unauthorized),
            404 => Err(NotionError::DatabaseNotFound(database_id.to_string())),
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60);
                Err(NotionError::RateLimited(retry_after))
            }
            code => {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&text)
                    .map(|body| format!("{}: {}", body.code, body.message))
                    .unwrap_or(text);
                Err(NotionError::Api {
                    status: code,
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(id: &str) -> serde_json::Value {
        json!({
            "object": "page",
            "id": id,
            "url": format!("https://www.notion.so/{}", id),
            "properties": {}
        })
    }

    #[tokio::test]
    async fn test_query_database() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .and(header("Authorization", "Bearer secret_abc"))
            .and(header("Notion-Version", NOTION_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "results": [page("p1"), {"object": "page", "id": "p2"}],
                "has_more": false,
                "next_cursor": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("secret_abc", &mock_server.uri());
        let pages = client.query_database("db1").await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, "p1");
        assert!(pages[1].url.is_none());
    }

    #[tokio::test]
    async fn test_query_database_follows_cursor() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .and(body_json(json!({"page_size": 100})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [page("p1"), page("p2")],
                "has_more": true,
                "next_cursor": "cursor-2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .and(body_json(json!({"start_cursor": "cursor-2", "page_size": 100})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [page("p3")],
                "has_more": false,
                "next_cursor": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("secret_abc", &mock_server.uri());
        let pages = client.query_database("db1").await.unwrap();

        let ids: Vec<&str> = pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("bad", &mock_server.uri());
        let result = client.query_database("db1").await;

        assert!(matches!(result, Err(NotionError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_database_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/missing/query"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("secret_abc", &mock_server.uri());
        let result = client.query_database("missing").await;

        assert!(matches!(result, Err(NotionError::DatabaseNotFound(ref id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "30"))
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("secret_abc", &mock_server.uri());
        let result = client.query_database("db1").await;

        assert!(matches!(result, Err(NotionError::RateLimited(30))));
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db1/query"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "object": "error",
                "status": 400,
                "code": "validation_error",
                "message": "body failed validation"
            })))
            .mount(&mock_server)
            .await;

        let client = NotionClient::with_base_url("secret_abc", &mock_server.uri());
        let err = client.query_database("db1").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Notion API error (400): validation_error: body failed validation"
        );
    }
}
