//! HTTP client for the console backend
//!
//! Thin wrapper around a shared `reqwest::Client`. Every request reads the
//! session from durable storage and, when one exists, attaches it as a
//! bearer token. There is no retry and no timeout: failures are returned to
//! the caller as they happened.

use crate::error::ApiError;
use crate::storage::ClientStorage;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Error payload shape the backend uses for failures
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

/// Backend API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<ClientStorage>,
}

impl ApiClient {
    /// Create a client with its own connection pool
    pub fn new(base_url: impl Into<String>, storage: Arc<ClientStorage>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, storage)
    }

    /// Create a client sharing an existing connection pool
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        storage: Arc<ClientStorage>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
        }
    }

    /// Base URL all paths are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storage the session token is read from
    pub fn storage(&self) -> &Arc<ClientStorage> {
        &self.storage
    }

    /// Issue `method path` with an optional JSON body and decode the response
    ///
    /// # Errors
    /// * `ApiError::Status` for non-2xx responses (with the server's
    ///   `message`, when present)
    /// * `ApiError::Transport` when no response was received
    /// * `ApiError::Decode` when the body is not the expected JSON
    /// * `ApiError::Storage` when the session cannot be read
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.request(method.clone(), self.url(path));
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(method, path, builder).await
    }

    /// GET `path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PATCH `body` as JSON to `path`
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// DELETE `path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// POST a multipart form to `path`
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let builder = self.http.post(self.url(path)).multipart(form);
        self.send(Method::POST, path, builder).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        Ok(match self.storage.session()? {
            Some(session) => builder.bearer_auth(session.token),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        debug!(request_id = %request_id, method = %method, path = %path, "Sending request");

        let response = self.authorize(builder)?.send().await.map_err(|e| {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Request failed"
            );
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "Request completed"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorPayload>(&body)
                .ok()
                .and_then(|payload| payload.message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // Empty bodies decode as JSON null so unit responses work
        let value = if body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, SessionUser};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn storage_with_token(token: Option<&str>) -> Arc<ClientStorage> {
        let storage = ClientStorage::in_memory();
        if let Some(token) = token {
            storage
                .save_session(&Session {
                    token: token.to_string(),
                    user: SessionUser {
                        email: "ops@example.com".to_string(),
                    },
                })
                .unwrap();
        }
        Arc::new(storage)
    }

    #[tokio::test]
    async fn test_bearer_token_attached_from_session() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/voice")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), storage_with_token(Some("abc")));
        let voices: Vec<serde_json::Value> = client.get("/voice").await.unwrap();

        mock.assert_async().await;
        assert!(voices.is_empty());
    }

    #[tokio::test]
    async fn test_no_session_no_authorization_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/voice")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), storage_with_token(None));
        let _: Vec<serde_json::Value> = client.get("voice").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_read_on_every_request() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/file")
            .match_header("authorization", Matcher::Missing)
            .with_body("[]")
            .create_async()
            .await;

        let storage = storage_with_token(None);
        let client = ApiClient::new(server.url(), storage.clone());
        let _: Vec<serde_json::Value> = client.get("/file").await.unwrap();
        first.assert_async().await;

        storage
            .save_session(&Session {
                token: "fresh".to_string(),
                user: SessionUser {
                    email: "ops@example.com".to_string(),
                },
            })
            .unwrap();

        let second = server
            .mock("GET", "/file")
            .match_header("authorization", "Bearer fresh")
            .with_body("[]")
            .create_async()
            .await;
        let _: Vec<serde_json::Value> = client.get("/file").await.unwrap();
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_payload_message_surfaced() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({"email": "a@b.c"})))
            .with_status(401)
            .with_body(r#"{"message": "Invalid credentials"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), storage_with_token(None));
        let result: Result<serde_json::Value, _> =
            client.post("/auth/login", &json!({"email": "a@b.c"})).await;

        mock.assert_async().await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_without_message_field() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/agent/1")
            .with_status(502)
            .with_body("<html>Bad gateway</html>")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), storage_with_token(None));
        let result: Result<serde_json::Value, _> = client.get("/agent/1").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ApiError::Status {
                status: 502,
                message: None
            })
        ));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/file/4")
            .with_status(204)
            .create_async()
            .await;

        let client = ApiClient::new(format!("{}/", server.url()), storage_with_token(None));
        let result: Result<(), _> = client.delete("/file/4").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/voice")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), storage_with_token(None));
        let result: Result<Vec<serde_json::Value>, _> = client.get("/voice").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to have an HTTP server
        let client = ApiClient::new("http://127.0.0.1:9", storage_with_token(None));
        let result: Result<serde_json::Value, _> = client.get("/voice").await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
