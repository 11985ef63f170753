// bowl-client/src/http.rs
// HTTP transport to the ordering server

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::csrf::CsrfToken;
use crate::error::{ClientError, ClientResult, preview};

/// HTTP client trait
///
/// Paths are absolute (`/api/...`). Form bodies are urlencoded, the
/// rest is JSON. Success bodies that are empty decode as JSON `null`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn delete_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T>;
    /// Fetch a server-rendered page as text
    async fn get_page(&self, path: &str) -> ClientResult<String>;
}

/// Network HTTP client
///
/// Cloning shares the connection pool, cookie jar and CSRF credential.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    csrf: Arc<RwLock<Option<CsrfToken>>>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            csrf: Arc::new(RwLock::new(config.csrf.clone())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn csrf(&self) -> Option<CsrfToken> {
        self.csrf.read().await.clone()
    }

    pub async fn set_csrf(&self, csrf: Option<CsrfToken>) {
        *self.csrf.write().await = csrf;
    }

    /// Load a page and adopt the CSRF credential from its meta tags.
    ///
    /// Returns whether a credential was found.
    pub async fn refresh_csrf(&self, page_path: &str) -> ClientResult<bool> {
        let html = self.get_page(page_path).await?;
        match CsrfToken::from_html(&html) {
            Some(csrf) => {
                tracing::debug!(header = csrf.header_name(), "CSRF credential refreshed");
                self.set_csrf(Some(csrf)).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method.clone(), self.url(path));
        if method != Method::GET
            && let Some(csrf) = self.csrf.read().await.as_ref()
        {
            req = req.header(csrf.header_name(), csrf.token());
        }
        req
    }

    fn transport_error(&self, err: reqwest::Error, method: &Method, path: &str) -> ClientError {
        if err.is_timeout() {
            tracing::warn!(%method, path, "request timed out");
            ClientError::Timeout {
                method: method.to_string(),
                path: path.to_string(),
                after: self.timeout,
            }
        } else {
            tracing::error!(%method, path, error = %err, "request failed");
            ClientError::Http(err)
        }
    }

    async fn read_body(
        &self,
        response: Response,
        method: &Method,
        path: &str,
    ) -> ClientResult<(reqwest::StatusCode, String, String)> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, method, path))?;
        Ok((status, content_type, text))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        method: Method,
        path: &str,
    ) -> ClientResult<T> {
        tracing::debug!(%method, path, "request");
        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;
        let (status, content_type, text) = self.read_body(response, &method, path).await?;
        if !status.is_success() {
            let err = ClientError::from_response(status, &text);
            tracing::warn!(%method, path, status = status.as_u16(), error = %err, "request rejected");
            return Err(err);
        }
        decode_body(&content_type, &text)
    }
}

/// Decode a success body.
///
/// Empty bodies decode as `null`. Bodies that are not JSON are offered
/// to `T` as a JSON string, so text replies satisfy `String` and
/// `IgnoredAny` targets but not structured ones.
pub fn decode_body<T: DeserializeOwned>(content_type: &str, text: &str) -> ClientResult<T> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ClientError::InvalidResponse("empty response body".to_string())
        });
    }

    let declared_json = content_type.contains("json");
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => serde_json::from_value(value).map_err(|e| {
            ClientError::InvalidResponse(format!("{e}: {}", preview(trimmed)))
        }),
        Err(e) if declared_json => Err(ClientError::InvalidResponse(format!(
            "malformed JSON ({e}): {}",
            preview(trimmed)
        ))),
        Err(_) => serde_json::from_value(serde_json::Value::String(text.to_string())).map_err(
            |_| {
                let kind = if content_type.is_empty() {
                    "unknown content type"
                } else {
                    content_type
                };
                ClientError::InvalidResponse(format!("expected JSON, got {kind}: {}", preview(trimmed)))
            },
        ),
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path).await;
        self.execute(req, Method::GET, path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await.json(body);
        self.execute(req, Method::POST, path).await
    }

    async fn post_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await.form(form);
        self.execute(req, Method::POST, path).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::POST, path).await;
        self.execute(req, Method::POST, path).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).await.json(body);
        self.execute(req, Method::PUT, path).await
    }

    async fn put_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).await.form(form);
        self.execute(req, Method::PUT, path).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path).await;
        self.execute(req, Method::DELETE, path).await
    }

    async fn delete_form<T: DeserializeOwned, F: Serialize + Sync>(
        &self,
        path: &str,
        form: &F,
    ) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path).await.form(form);
        self.execute(req, Method::DELETE, path).await
    }

    async fn get_page(&self, path: &str) -> ClientResult<String> {
        let method = Method::GET;
        let req = self.request(method.clone(), path).await;
        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &method, path))?;
        let (status, _, text) = self.read_body(response, &method, path).await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status, &text));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[derive(Debug, serde::Deserialize)]
    struct Count {
        count: u64,
    }

    #[test]
    fn test_decode_empty_body() {
        let _: () = decode_body("", "").unwrap();
        let none: Option<Count> = decode_body("application/json", "  ").unwrap();
        assert!(none.is_none());
        assert!(decode_body::<Count>("", "").is_err());
    }

    #[test]
    fn test_decode_text_reply() {
        let _: IgnoredAny = decode_body("text/plain", "Item removed").unwrap();
        let err = decode_body::<Count>("text/html", "<html>login</html>").unwrap_err();
        match err {
            ClientError::InvalidResponse(msg) => {
                assert!(msg.contains("text/html"));
                assert!(msg.contains("<html>login</html>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_malformed_json_is_truncated() {
        let body = format!("{{\"count\": {}", "9".repeat(400));
        let err = decode_body::<Count>("application/json", &body).unwrap_err();
        match err {
            ClientError::InvalidResponse(msg) => assert!(msg.chars().count() < 350),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_json() {
        let c: Count = decode_body("application/json", r#"{"count":3,"status":"Pending"}"#).unwrap();
        assert_eq!(c.count, 3);
    }
}
