//! HTTP transport for the reservation service
//!
//! One `reqwest` client with a cookie store: the session cookie set by
//! `/auth/login` rides along on every later request. Status codes are
//! mapped onto [`ClientError`] here, and a 401 on any call marks the
//! session as expired.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionContext;

/// HTTP client for the reservation service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "HTTP request");
        self.client.request(method, self.url(path))
    }

    // ========== Typed helpers ==========

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.fetch(self.request(Method::GET, path)).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.fetch(self.request(Method::GET, path).query(query)).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.fetch(self.request(Method::POST, path).json(body)).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.fetch(self.request(Method::PATCH, path).json(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.fetch(self.request(Method::PUT, path).json(body)).await
    }

    /// Send a request whose response body is not needed
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await.map(|_| ())
    }

    /// Make a DELETE request, ignoring the body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    // ========== Auth ==========

    /// Exchange credentials for a session cookie (HTTP Basic, empty JSON body)
    pub async fn login_basic(&self, email: &str, password: &str) -> ClientResult<()> {
        let credentials = STANDARD.encode(format!("{email}:{password}"));
        let request = self
            .request(Method::POST, "auth/login")
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .json(&serde_json::json!({}));
        self.execute(request).await.map(|_| ())
    }

    // ========== Response handling ==========

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("unreadable body: {e}")))
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text, status);
        tracing::warn!(status = status.as_u16(), %message, "Request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                self.session.expire().await;
                ClientError::Unauthorized
            }
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            s if s.is_client_error() => ClientError::Conflict(message),
            _ => ClientError::Internal(message),
        })
    }
}

/// Pulls a readable message out of an error body.
///
/// JSON bodies carry `message` (a string or a list of strings) or `error`;
/// anything else is used as plain text.
pub(crate) fn error_message(body: &str, status: StatusCode) -> String {
    let fallback = || format!("Error ({})", status.as_u16());
    let body = body.trim();
    if body.is_empty() {
        return fallback();
    }
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    let message = match &value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => match obj.get("message") {
            Some(Value::Array(parts)) => Some(
                parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Some(Value::String(s)) => Some(s.clone()),
            _ => obj.get("error").and_then(Value::as_str).map(str::to_string),
        },
        _ => None,
    };
    message.filter(|m| !m.is_empty()).unwrap_or_else(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_shapes() {
        let s = StatusCode::BAD_REQUEST;
        assert_eq!(error_message(r#"{"message":"No free table"}"#, s), "No free table");
        assert_eq!(
            error_message(r#"{"message":["people must be positive","time invalid"]}"#, s),
            "people must be positive, time invalid"
        );
        assert_eq!(error_message(r#"{"error":"Bad Request"}"#, s), "Bad Request");
        assert_eq!(error_message("plain text", s), "plain text");
        assert_eq!(error_message("", s), "Error (400)");
        assert_eq!(error_message(r#"{"statusCode":400}"#, s), "Error (400)");
    }

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(
            &ClientConfig::new("http://localhost:3000/api/"),
            SessionContext::new(),
        )
        .unwrap();
        assert_eq!(client.url("/reservations/my"), "http://localhost:3000/api/reservations/my");
        assert_eq!(client.url("auth/me"), "http://localhost:3000/api/auth/me");
    }
}
